use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteTeam {
    pub id: u32,
    pub name: String,
    pub flag: String,
}

#[derive(Debug, Clone)]
pub struct Profile {
    pub teams: Vec<FavoriteTeam>,
    pub notifications: bool,
    favorites: HashSet<u32>,
}

impl Default for Profile {
    fn default() -> Self {
        Self::new()
    }
}

impl Profile {
    pub fn new() -> Self {
        let teams = [
            (1, "Mexico", "mexico"),
            (2, "Argentina", "argentina"),
            (3, "Brazil", "brazil"),
            (4, "USA", "usa"),
            (5, "Germany", "germany"),
        ]
        .into_iter()
        .map(|(id, name, flag)| FavoriteTeam {
            id,
            name: name.to_string(),
            flag: flag.to_string(),
        })
        .collect();
        Self {
            teams,
            notifications: true,
            favorites: HashSet::new(),
        }
    }

    /// Flips `team_id` in the favorites set; returns whether it is now a favorite.
    /// Ids that are not in `teams` are ignored.
    pub fn toggle_favorite(&mut self, team_id: u32) -> bool {
        if !self.teams.iter().any(|t| t.id == team_id) {
            return false;
        }
        if self.favorites.remove(&team_id) {
            false
        } else {
            self.favorites.insert(team_id);
            true
        }
    }

    pub fn is_favorite(&self, team_id: u32) -> bool {
        self.favorites.contains(&team_id)
    }

    /// Alphabetical, comma-separated; `"None"` when nothing is picked.
    pub fn favorite_names(&self) -> String {
        let mut names: Vec<&str> = self
            .teams
            .iter()
            .filter(|t| self.favorites.contains(&t.id))
            .map(|t| t.name.as_str())
            .collect();
        if names.is_empty() {
            return "None".to_string();
        }
        names.sort_unstable();
        names.join(", ")
    }

    pub fn toggle_notifications(&mut self) -> bool {
        self.notifications = !self.notifications;
        self.notifications
    }
}

#[cfg(test)]
mod tests {
    use super::Profile;

    #[test]
    fn favorites_toggle_and_sort() {
        let mut profile = Profile::new();
        assert_eq!(profile.favorite_names(), "None");

        assert!(profile.toggle_favorite(5));
        assert!(profile.toggle_favorite(2));
        assert_eq!(profile.favorite_names(), "Argentina, Germany");

        assert!(!profile.toggle_favorite(5));
        assert!(!profile.is_favorite(5));
        assert_eq!(profile.favorite_names(), "Argentina");
    }

    #[test]
    fn unknown_team_is_ignored() {
        let mut profile = Profile::new();
        assert!(!profile.toggle_favorite(99));
        assert_eq!(profile.favorite_names(), "None");
    }

    #[test]
    fn notifications_flip() {
        let mut profile = Profile::new();
        assert!(profile.notifications);
        assert!(!profile.toggle_notifications());
        assert!(profile.toggle_notifications());
    }
}
