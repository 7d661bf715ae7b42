use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardCounts {
    pub users: i64,
    pub admins: i64,
    pub phones: i64,
    pub brands: i64,
    pub reviews: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CountEntry {
    pub name: &'static str,
    pub num_of_data: i64,
}

impl DashboardCounts {
    pub fn entries(&self) -> Vec<CountEntry> {
        [
            ("users", self.users),
            ("admins", self.admins),
            ("phones", self.phones),
            ("brands", self.brands),
            ("reviews", self.reviews),
        ]
        .into_iter()
        .map(|(name, num_of_data)| CountEntry { name, num_of_data })
        .collect()
    }
}
