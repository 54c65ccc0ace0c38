//! Custom serialization/deserialization implementations.

/// Calendar dates. The backend sends either plain `YYYY-MM-DD` dates or full timestamps;
/// only the date part is kept. Dates are always written as `YYYY-MM-DD`.
pub mod date {
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};
    use time::{format_description::FormatItem, macros::format_description, Date};

    const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

    /// Parses a `YYYY-MM-DD` date, ignoring anything after the date part
    pub fn parse(text: &str) -> Result<Date, time::error::Parse> {
        let date_part = text.trim().get(..10).unwrap_or(text.trim());
        Date::parse(date_part, DATE_FORMAT)
    }

    /// Serialize a [`Date`] as `YYYY-MM-DD`
    pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        date.format(DATE_FORMAT)
            .map_err(serde::ser::Error::custom)
            .and_then(|formatted| serializer.serialize_str(&formatted))
    }

    /// Deserialize a [`Date`] from a date or a timestamp
    pub fn deserialize<'a, D>(deserializer: D) -> Result<Date, D::Error>
    where
        D: Deserializer<'a>,
    {
        let text = String::deserialize(deserializer)?;
        parse(&text).map_err(D::Error::custom)
    }

    /// Optional dates; `null` and empty strings become `None`
    pub mod option {
        use serde::{de::Error as _, Deserialize, Deserializer, Serializer};
        use time::Date;

        /// Serialize an [`Option<Date>`]
        pub fn serialize<S>(date: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match date {
                Some(date) => super::serialize(date, serializer),
                None => serializer.serialize_none(),
            }
        }

        /// Deserialize an [`Option<Date>`]
        pub fn deserialize<'a, D>(deserializer: D) -> Result<Option<Date>, D::Error>
        where
            D: Deserializer<'a>,
        {
            Option::<String>::deserialize(deserializer)?
                .filter(|text| !text.trim().is_empty())
                .map(|text| super::parse(&text).map_err(D::Error::custom))
                .transpose()
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde::{Deserialize, Serialize};
    use time::{macros::date, Date};

    #[derive(Debug, Serialize, Deserialize)]
    struct Installment {
        #[serde(with = "super::date")]
        due_date: Date,
        #[serde(default, with = "super::date::option")]
        paid_on: Option<Date>,
    }

    #[test]
    fn accepts_dates_and_timestamps() {
        let plain: Installment =
            serde_json::from_str(r#"{"due_date":"2024-05-01","paid_on":null}"#).unwrap();
        assert_eq!(plain.due_date, date!(2024 - 05 - 01));
        assert_eq!(plain.paid_on, None);

        let timestamp: Installment = serde_json::from_str(
            r#"{"due_date":"2024-05-01T00:00:00.000Z","paid_on":"2024-05-03T10:15:00Z"}"#,
        )
        .unwrap();
        assert_eq!(timestamp.paid_on, Some(date!(2024 - 05 - 03)));

        let missing: Installment = serde_json::from_str(r#"{"due_date":"2024-05-01"}"#).unwrap();
        assert_eq!(missing.paid_on, None);
        assert_eq!(
            serde_json::to_string(&missing).unwrap(),
            r#"{"due_date":"2024-05-01","paid_on":null}"#
        );
    }
}
