//! SmartOilGauge API Type Definitions
//!
//! Response shapes returned by `ajax/main_ajax.php` for the `get_tanks_list` action.
//!
//! # Design Notes
//!
//! - **Strings for numbers**: The dashboard encodes gallons and capacities as strings
//!   (`"123.4"`). Occasionally a number slips through unquoted, so the numeric fields
//!   accept either and keep the raw text; parsing happens later, per field.
//! - **Optional everything**: Any field may be missing or `null`. Only the identity
//!   labels default to an empty string.
//! - **Loose fields**: Values the site sends with varying types (`model_gallons`,
//!   `ddd`, `pt_id`, `brand_locked`, `Status`, the `buy` ids) stay as
//!   `serde_json::Value`. Only the gallon fields feed metrics, so nothing else
//!   may fail a decode.
//! - **PHP empty objects**: An empty `buy` block arrives as `[]`; anything that is
//!   not an object decodes as `None`.
//! - **Pass-through**: Unknown keys land in `extra` instead of being dropped.

#![allow(dead_code)] // Allow unused fields in API structs for completeness
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

/// Message the dashboard returns in place of data when the session has lapsed.
pub const ACCESS_DENIED_MESSAGE: &str = "Access Denied";

/// `result` value marking a failed request.
pub const RESULT_ERROR: &str = "error";

/// Envelope returned by the `get_tanks_list` action
#[derive(Debug, Deserialize, Clone, Default)]
pub struct TankListResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub result: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tanks: Vec<TankDetails>,
}

impl TankListResponse {
    pub fn is_error(&self) -> bool {
        self.result == RESULT_ERROR
    }
}

/// One tank as reported by the dashboard
#[derive(Debug, Deserialize, Clone, Default)]
pub struct TankDetails {
    #[serde(default, deserialize_with = "lenient_string")]
    pub tank_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub tank_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub zip_code: String,

    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub sensor_gallons: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub nominal: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub fillable: Option<String>,

    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub result: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub low_level: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub sensor_rt: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub sensor_usg: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub can_fs: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub model_monitored: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub battery: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub sensor_status: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub last_read: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub deadzone: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub data_servers: Option<String>,

    pub model_gallons: Option<serde_json::Value>,
    pub ddd: Option<serde_json::Value>,
    pub pt_id: Option<serde_json::Value>,
    pub brand_locked: Option<serde_json::Value>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub sensors: Vec<SensorRegistration>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub buy: Option<BuyInfo>,
    #[serde(rename = "Status")]
    pub status: Option<serde_json::Value>,

    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Sensor registered against a tank
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SensorRegistration {
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub registration_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub sensor_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub registration_date: Option<String>,
    pub end_date: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub l_read: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub l_gallons: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub l_battery: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub l_pulse: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub rlm: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub plm: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub ulm: Option<String>,
    pub ublf: Option<serde_json::Value>,
    pub rblf: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub usg: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub nrbf: Option<String>,
}

/// Fuel dealer block attached to each tank
#[derive(Debug, Deserialize, Clone, Default)]
pub struct BuyInfo {
    pub brand_id: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub brand_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub can_buy: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub pro: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub brand_btn: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub link_btn: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub buy_btn: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub brand_ep: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub link_ep: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub buy_ep: Option<String>,
    pub brand_ep_ext: Option<serde_json::Value>,
    pub can_sell: Option<serde_json::Value>,
}

/// Whether a tank-list response means the session is gone.
///
/// The dashboard signals this three ways: a 401, a 403, or a 200 whose envelope
/// carries the "Access Denied" message.
pub fn is_unauthenticated(status: u16, envelope: &TankListResponse) -> bool {
    status == 401 || status == 403 || envelope.message == ACCESS_DENIED_MESSAGE
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_string(deserializer)?.unwrap_or_default())
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(value @ serde_json::Value::Object(_)) => {
            serde_json::from_value(value).map(Some).map_err(serde::de::Error::custom)
        }
        _ => Ok(None),
    }
}
