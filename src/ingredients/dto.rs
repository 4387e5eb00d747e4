use serde::Deserialize;
use time::Date;

#[derive(Debug, Deserialize)]
pub struct CreateIngredient {
    pub name: String,
    #[serde(default = "default_category")]
    pub category: String,
    pub location: String,
    pub quantity: f64,
    pub unit: String,
    pub expiry_date: Option<Date>,
}

fn default_category() -> String {
    "Unknown".into()
}

#[derive(Debug, Deserialize)]
pub struct UpdateIngredient {
    pub name: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub expiry_date: Option<Date>,
}

#[derive(Debug, Deserialize)]
pub struct ListFilter {
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExpiringFilter {
    #[serde(default = "default_days")]
    pub days: i64,
}

fn default_days() -> i64 {
    7
}

impl ExpiringFilter {
    /// Window in days, clamped to [0, 3650] so out-of-range query values
    /// neither wrap nor turn the route into an already-expired listing.
    pub fn window(&self) -> i32 {
        self.days.clamp(0, 3650) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiring_window_is_clamped() {
        assert_eq!(ExpiringFilter { days: 7 }.window(), 7);
        assert_eq!(ExpiringFilter { days: 0 }.window(), 0);
        assert_eq!(ExpiringFilter { days: -5 }.window(), 0);
        assert_eq!(ExpiringFilter { days: i64::MAX }.window(), 3650);
    }
}
