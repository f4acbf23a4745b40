use crate::shared::choice::YesNo;
use crate::shared::de::{flexible_bool, lenient_string, string_or_number};
use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Saved search as listed by GET `/get_saved_searches`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedSearch {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub cron_schedule: Option<String>,
    #[serde(default)]
    pub trigger: Option<String>,
    #[serde(default)]
    pub lookback: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub execution_count: Option<i64>,
    #[serde(default, deserialize_with = "flexible_bool")]
    pub disabled: bool,
    #[serde(default, deserialize_with = "flexible_bool")]
    pub send_email: bool,
    /// ISO timestamp, or `"N/A"` when the cron expression has no next run.
    #[serde(default)]
    pub next_scheduled_time: Option<String>,
}

impl SavedSearch {
    pub fn status_label(&self) -> &'static str {
        if self.disabled {
            "Disabled"
        } else {
            "Active"
        }
    }

    /// Label of the menu entry that flips `disabled`.
    pub fn toggle_label(&self) -> &'static str {
        if self.disabled {
            "Enable"
        } else {
            "Disable"
        }
    }

    /// The query to run, if the listing carried a non-blank one.
    pub fn runnable_query(&self) -> Option<&str> {
        self.query.as_deref().filter(|q| !q.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavedSearchListResponse {
    #[serde(default)]
    pub searches: Vec<SavedSearch>,
}

/// When a saved search fires its alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Trigger {
    #[default]
    Once,
    PerResult,
}

impl Trigger {
    pub const ALL: [Trigger; 2] = [Trigger::Once, Trigger::PerResult];

    pub fn label(&self) -> &'static str {
        match self {
            Trigger::Once => "Once",
            Trigger::PerResult => "Per Result",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace('_', " ").as_str() {
            "once" => Some(Trigger::Once),
            "per result" => Some(Trigger::PerResult),
            _ => None,
        }
    }
}

impl Serialize for Trigger {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Trigger {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        if raw.trim().is_empty() {
            return Ok(Trigger::default());
        }
        Trigger::from_label(&raw)
            .ok_or_else(|| D::Error::custom("Trigger must be either 'Once' or 'Per Result'."))
    }
}

/// Editable fields of a saved search, as the create and update forms submit
/// them and as GET `/get_saved_search/<id>` returns them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedSearchDto {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub query: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub cron_schedule: String,
    #[serde(default)]
    pub trigger: Trigger,
    #[serde(default, deserialize_with = "lenient_string")]
    pub lookback: String,
    #[serde(default)]
    pub throttle: YesNo,
    #[serde(default, deserialize_with = "lenient_string")]
    pub throttle_time_period: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub throttle_by: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub event_message: String,
    #[serde(default)]
    pub send_email: YesNo,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email_address: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email_content: String,
    #[serde(default, deserialize_with = "flexible_bool")]
    pub disabled: bool,
}

impl Default for SavedSearchDto {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            query: String::new(),
            cron_schedule: String::new(),
            trigger: Trigger::Once,
            lookback: "-1h".to_string(),
            throttle: YesNo::No,
            throttle_time_period: String::new(),
            throttle_by: String::new(),
            event_message: String::new(),
            send_email: YesNo::No,
            email_address: String::new(),
            email_content: String::new(),
            disabled: false,
        }
    }
}

/// `-<digits><unit>` repeated, unit one of `smhdw` (e.g. `-1d-12h`).
pub fn is_relative_span(value: &str) -> bool {
    let mut chars = value.chars().peekable();
    if chars.peek().is_none() {
        return false;
    }
    while let Some(c) = chars.next() {
        if c != '-' {
            return false;
        }
        let mut digits = 0;
        while chars.peek().is_some_and(|c| c.is_ascii_digit()) {
            chars.next();
            digits += 1;
        }
        if digits == 0 || !matches!(chars.next(), Some('s' | 'm' | 'h' | 'd' | 'w')) {
            return false;
        }
    }
    true
}

impl SavedSearchDto {
    /// Trimmed copy; throttle and email settings are cleared when their
    /// select is "no".
    pub fn normalized(&self) -> Self {
        let mut out = Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            query: self.query.trim().to_string(),
            cron_schedule: self.cron_schedule.trim().to_string(),
            lookback: self.lookback.trim().to_string(),
            throttle_time_period: self.throttle_time_period.trim().to_string(),
            throttle_by: self.throttle_by.trim().to_string(),
            event_message: self.event_message.trim().to_string(),
            email_address: self.email_address.trim().to_string(),
            email_content: self.email_content.trim().to_string(),
            ..self.clone()
        };
        if !out.throttle.is_yes() {
            out.throttle_time_period.clear();
            out.throttle_by.clear();
        }
        if !out.send_email.is_yes() {
            out.email_address.clear();
            out.email_content.clear();
        }
        out
    }

    pub fn validate_title(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Title cannot be empty.".into());
        }
        Ok(())
    }

    /// Checks shared by the create and edit forms.
    pub fn validate(&self) -> Result<(), String> {
        self.validate_title()?;
        if self.query.trim().is_empty() || self.cron_schedule.trim().is_empty() {
            return Err("Please fill in all required fields.".into());
        }
        let lookback = self.lookback.trim();
        if !is_relative_span(lookback) {
            return Err(format!(
                "Invalid lookback format: '{}'. Lookback must be a sequence of time periods like '-1s', '-1m', '-1h', '-1d', '-1w'.",
                lookback
            ));
        }
        if self.throttle.is_yes() {
            if self.throttle_by.trim().is_empty() {
                return Err("Throttle By must be filled out when Throttle is set to Yes.".into());
            }
            let period = self.throttle_time_period.trim();
            if period.is_empty() {
                return Err(
                    "Throttle Time Period must be filled out when Throttle is set to Yes.".into(),
                );
            }
            if !is_relative_span(period) {
                return Err(format!("Invalid throttle time period format: '{}'.", period));
            }
        }
        if self.send_email.is_yes() {
            let address = self.email_address.trim();
            if address.is_empty() {
                return Err("Email Address must be filled out when Send Email is set to Yes.".into());
            }
            if self.email_content.trim().is_empty() {
                return Err("Email Content must be filled out when Send Email is set to Yes.".into());
            }
            if !address.contains('@') {
                return Err(format!("Invalid email address format: '{}'.", address));
            }
        }
        Ok(())
    }

    /// The edit form also requires a description.
    pub fn validate_update(&self) -> Result<(), String> {
        if self.description.trim().is_empty() {
            return Err("Please fill in all required fields.".into());
        }
        self.validate()
    }
}

/// Body of POST `/commit_saved_search`: the form plus the correlation id of
/// the query being saved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommitSavedSearchRequest {
    pub request_id: String,
    #[serde(flatten)]
    pub search: SavedSearchDto,
}

/// Body of POST `/check_title_unique`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleCheckRequest {
    pub title: String,
}

/// Answer of `/check_title_unique`; it carries no status field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct TitleCheckResponse {
    #[serde(default)]
    pub is_unique: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SavedSearchDetailResponse {
    pub search: SavedSearchDto,
}

/// Success payload of the commit and update endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SavedSearchWriteResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::envelope::decode_envelope;

    #[test]
    fn test_listing() {
        let body = r#"{"status":"success","searches":[
            {"id": 3, "title": "Errors", "description": null, "cron_schedule": "*/5 * * * *",
             "trigger": "Once", "lookback": "-1h", "owner": "admin", "execution_count": 12,
             "disabled": false, "send_email": true, "next_scheduled_time": "2024-01-04T10:05:00"},
            {"id": "a-7", "title": "Disabled one", "disabled": 1, "query": "  "}
        ]}"#;
        let resp: SavedSearchListResponse = decode_envelope(body).unwrap();
        let first = &resp.searches[0];
        assert_eq!(first.id, "3");
        assert_eq!(first.status_label(), "Active");
        assert_eq!(first.toggle_label(), "Disable");
        assert!(first.send_email);

        let second = &resp.searches[1];
        assert_eq!(second.id, "a-7");
        assert!(second.disabled);
        assert_eq!(second.toggle_label(), "Enable");
        assert_eq!(second.runnable_query(), None);
    }

    fn valid_form() -> SavedSearchDto {
        SavedSearchDto {
            title: "Errors".into(),
            description: "errors in the last hour".into(),
            query: "level=\"ERROR\"".into(),
            cron_schedule: "*/5 * * * *".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_relative_span() {
        for ok in ["-1h", "-15m", "-1d-12h", "-2w"] {
            assert!(is_relative_span(ok), "{ok}");
        }
        for bad in ["", "1h", "-h", "-1y", "-1h-", "-1 h"] {
            assert!(!is_relative_span(bad), "{bad}");
        }
    }

    #[test]
    fn test_validate_required_fields() {
        assert!(valid_form().validate_update().is_ok());
        let untitled = SavedSearchDto { title: "  ".into(), ..valid_form() };
        assert_eq!(untitled.validate().unwrap_err(), "Title cannot be empty.");
        let no_query = SavedSearchDto { query: String::new(), ..valid_form() };
        assert_eq!(no_query.validate().unwrap_err(), "Please fill in all required fields.");
        let no_description = SavedSearchDto { description: String::new(), ..valid_form() };
        assert!(no_description.validate().is_ok());
        assert!(no_description.validate_update().is_err());
        let bad_lookback = SavedSearchDto { lookback: "1h".into(), ..valid_form() };
        assert!(bad_lookback.validate().unwrap_err().starts_with("Invalid lookback format"));
    }

    #[test]
    fn test_validate_conditional_sections() {
        let throttled = SavedSearchDto { throttle: YesNo::Yes, ..valid_form() };
        assert_eq!(
            throttled.validate().unwrap_err(),
            "Throttle By must be filled out when Throttle is set to Yes."
        );
        let throttled = SavedSearchDto {
            throttle_by: "host".into(),
            throttle_time_period: "-30m".into(),
            ..throttled
        };
        assert!(throttled.validate().is_ok());

        let mailing = SavedSearchDto {
            send_email: YesNo::Yes,
            email_address: "ops@example.com".into(),
            ..valid_form()
        };
        assert_eq!(
            mailing.validate().unwrap_err(),
            "Email Content must be filled out when Send Email is set to Yes."
        );
        let mailing = SavedSearchDto { email_address: "ops".into(), email_content: "x".into(), ..mailing };
        assert!(mailing.validate().unwrap_err().starts_with("Invalid email address format"));
    }

    #[test]
    fn test_normalized_clears_disabled_sections() {
        let form = SavedSearchDto {
            title: " Errors ".into(),
            throttle_by: "N/A".into(),
            email_address: "N/A".into(),
            ..valid_form()
        };
        let out = form.normalized();
        assert_eq!(out.title, "Errors");
        assert_eq!(out.throttle_by, "");
        assert_eq!(out.email_address, "");
    }

    #[test]
    fn test_detail_and_commit_shapes() {
        let body = r#"{"status":"success","search":{
            "title":"Errors","description":null,"query":"x","cron_schedule":"0 * * * *",
            "trigger":"per result","lookback":"-1h","throttle":"No","throttle_time_period":0,
            "throttle_by":"N/A","event_message":"hit","send_email":"Yes",
            "email_address":"a@b.c","email_content":"body","disabled":1}}"#;
        let detail: SavedSearchDetailResponse = decode_envelope(body).unwrap();
        let search = detail.search;
        assert_eq!(search.trigger, Trigger::PerResult);
        assert_eq!(search.throttle_time_period, "0");
        assert_eq!(search.send_email, YesNo::Yes);
        assert!(search.disabled);
        assert_eq!(search.description, "");

        let commit = CommitSavedSearchRequest {
            request_id: "3f1c".into(),
            search: valid_form(),
        };
        let json = serde_json::to_value(&commit).unwrap();
        assert_eq!(json["request_id"], "3f1c");
        assert_eq!(json["title"], "Errors");
        assert_eq!(json["trigger"], "Once");
        assert_eq!(json["throttle"], "no");
        assert_eq!(json["disabled"], false);
    }
}
