use crate::model::{League, Nation, RarityDefinition, Team};

/// Lookup tables shared by every screen. Loaded once per session and handed to
/// renderers explicitly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceData {
    pub nations: Vec<Nation>,
    pub leagues: Vec<League>,
    pub rarities: Vec<RarityDefinition>,
    pub teams: Vec<Team>,
}

impl ReferenceData {
    /// True once every table has been loaded; a complete set is reused as-is.
    pub fn is_complete(&self) -> bool {
        !self.nations.is_empty()
            && !self.leagues.is_empty()
            && !self.rarities.is_empty()
            && !self.teams.is_empty()
    }

    pub fn rarity(&self, id: u32) -> Option<&RarityDefinition> {
        self.rarities.iter().find(|r| r.id == id)
    }

    pub fn nation_name(&self, id: u32) -> Option<&str> {
        self.nations
            .iter()
            .find(|n| n.id == id)
            .map(|n| n.name.as_str())
    }

    pub fn league_name(&self, id: u32) -> Option<&str> {
        self.leagues
            .iter()
            .find(|l| l.id == id)
            .map(|l| l.name.as_str())
    }

    pub fn team_name(&self, id: u32) -> Option<&str> {
        self.teams
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.name.as_str())
    }

    pub fn summary(&self) -> String {
        format!(
            "{} nations, {} leagues, {} rarities, {} teams",
            self.nations.len(),
            self.leagues.len(),
            self.rarities.len(),
            self.teams.len()
        )
    }
}
