use chrono::{Local, NaiveDate};

use crate::config::AppConfig;

/// Settings for one run: the config file with command-line overrides on top.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub birthday: Option<NaiveDate>,
    pub life_expectancy: u32,
    pinned_today: Option<NaiveDate>,
}

impl Session {
    pub fn resolve(
        config: &AppConfig,
        birthday: Option<NaiveDate>,
        life_expectancy: Option<u32>,
        today: Option<NaiveDate>,
    ) -> Self {
        Self {
            birthday: birthday.or(config.profile.birthday),
            life_expectancy: life_expectancy.unwrap_or(config.profile.life_expectancy),
            pinned_today: today,
        }
    }

    /// Wall-clock date, unless pinned with `--today`.
    pub fn today(&self) -> NaiveDate {
        self.pinned_today
            .unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned_today.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_win_over_config() {
        let mut config = AppConfig::default();
        config.profile.birthday = NaiveDate::from_ymd_opt(1990, 1, 1);

        let plain = Session::resolve(&config, None, None, None);
        assert_eq!(plain.birthday, NaiveDate::from_ymd_opt(1990, 1, 1));
        assert_eq!(plain.life_expectancy, 85);
        assert!(!plain.is_pinned());

        let today = NaiveDate::from_ymd_opt(2024, 6, 8).unwrap();
        let session = Session::resolve(
            &config,
            NaiveDate::from_ymd_opt(1980, 6, 1),
            Some(90),
            Some(today),
        );
        assert_eq!(session.birthday, NaiveDate::from_ymd_opt(1980, 6, 1));
        assert_eq!(session.life_expectancy, 90);
        assert_eq!(session.today(), today);
    }
}
