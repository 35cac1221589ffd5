use std::io::Read;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use super::ImportError;

/// One day of store metrics from a platform export.
#[derive(Debug)]
pub(crate) struct DailyRecord {
    pub(crate) date: NaiveDate,
    pub(crate) visitors: u64,
    pub(crate) sessions: Option<u64>,
    pub(crate) product_views: u64,
    pub(crate) add_to_carts: u64,
    pub(crate) checkouts: u64,
    pub(crate) purchases: u64,
    pub(crate) revenue: f64,
    pub(crate) bounce_rate: Option<f64>,
    /// (channel name, visits) for the columns present in the export.
    pub(crate) channel_visits: Vec<(&'static str, u64)>,
    /// (device label, conversion rate) for the columns present in the export.
    pub(crate) device_conversion: Vec<(&'static str, f64)>,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<DailyRecord>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for record in csv_reader.deserialize::<ExportRow>() {
        let row = record?;
        let date = NaiveDate::parse_from_str(row.date.trim(), "%Y-%m-%d").map_err(|source| {
            ImportError::Date {
                raw: row.date.clone(),
                source,
            }
        })?;

        let mut channel_visits = Vec::new();
        for (channel, visits) in [
            ("organic", row.organic_visits),
            ("paid", row.paid_visits),
            ("social", row.social_visits),
            ("email", row.email_visits),
            ("direct", row.direct_visits),
        ] {
            if let Some(visits) = visits {
                channel_visits.push((channel, visits));
            }
        }

        let mut device_conversion = Vec::new();
        for (device, rate) in [
            ("desktop", row.desktop_conversion),
            ("mobile", row.mobile_conversion),
            ("tablet", row.tablet_conversion),
        ] {
            if let Some(rate) = rate {
                device_conversion.push((device, rate));
            }
        }

        records.push(DailyRecord {
            date,
            visitors: row.visitors,
            sessions: row.sessions,
            product_views: row.product_views,
            add_to_carts: row.add_to_carts,
            checkouts: row.checkouts,
            purchases: row.purchases,
            revenue: row.revenue,
            bounce_rate: row.bounce_rate,
            channel_visits,
            device_conversion,
        });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct ExportRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Visitors")]
    visitors: u64,
    #[serde(rename = "Sessions", default, deserialize_with = "optional_count")]
    sessions: Option<u64>,
    #[serde(rename = "Product Views")]
    product_views: u64,
    #[serde(rename = "Add to Carts")]
    add_to_carts: u64,
    #[serde(rename = "Checkouts")]
    checkouts: u64,
    #[serde(rename = "Purchases")]
    purchases: u64,
    #[serde(rename = "Revenue")]
    revenue: f64,
    #[serde(rename = "Bounce Rate", default, deserialize_with = "optional_metric")]
    bounce_rate: Option<f64>,
    #[serde(rename = "Organic Visits", default, deserialize_with = "optional_count")]
    organic_visits: Option<u64>,
    #[serde(rename = "Paid Visits", default, deserialize_with = "optional_count")]
    paid_visits: Option<u64>,
    #[serde(rename = "Social Visits", default, deserialize_with = "optional_count")]
    social_visits: Option<u64>,
    #[serde(rename = "Email Visits", default, deserialize_with = "optional_count")]
    email_visits: Option<u64>,
    #[serde(rename = "Direct Visits", default, deserialize_with = "optional_count")]
    direct_visits: Option<u64>,
    #[serde(
        rename = "Desktop Conversion",
        default,
        deserialize_with = "optional_metric"
    )]
    desktop_conversion: Option<f64>,
    #[serde(
        rename = "Mobile Conversion",
        default,
        deserialize_with = "optional_metric"
    )]
    mobile_conversion: Option<f64>,
    #[serde(
        rename = "Tablet Conversion",
        default,
        deserialize_with = "optional_metric"
    )]
    tablet_conversion: Option<f64>,
}

fn optional_metric<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.filter(|value| !value.trim().is_empty())
        .map(|value| value.trim().parse::<f64>().map_err(serde::de::Error::custom))
        .transpose()
}

fn optional_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.filter(|value| !value.trim().is_empty())
        .map(|value| value.trim().parse::<u64>().map_err(serde::de::Error::custom))
        .transpose()
}
