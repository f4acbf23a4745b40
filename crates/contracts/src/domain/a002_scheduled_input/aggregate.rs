use crate::shared::choice::{serialize_label, YesNo};
use crate::shared::de::{flexible_bool, lenient_string, optional_f64, string_or_number};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Scheduled input as listed by GET `/get_scheduled_inputs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledInput {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub cron_schedule: Option<String>,
    #[serde(default)]
    pub subdirectory: Option<String>,
    /// Epoch seconds.
    #[serde(default, deserialize_with = "optional_f64")]
    pub created_at: Option<f64>,
    #[serde(default, deserialize_with = "flexible_bool")]
    pub overwrite: bool,
    #[serde(default, deserialize_with = "flexible_bool")]
    pub disabled: bool,
}

impl ScheduledInput {
    pub fn status_label(&self) -> &'static str {
        if self.disabled {
            "disabled"
        } else {
            "enabled"
        }
    }

    pub fn toggle_label(&self) -> &'static str {
        if self.disabled {
            "Enable"
        } else {
            "Disable"
        }
    }

    pub fn subdirectory_label(&self) -> &str {
        self.subdirectory
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or("None")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduledInputListResponse {
    #[serde(default)]
    pub inputs: Vec<ScheduledInput>,
}

/// Response of POST `/toggle_disable_scheduled_input/<id>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleDisableResponse {
    #[serde(default)]
    pub new_disabled: Option<bool>,
}

/// Editable fields of a scheduled input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduledInputDto {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub code: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub cron_schedule: String,
    #[serde(default, serialize_with = "serialize_label")]
    pub overwrite: YesNo,
    #[serde(default, deserialize_with = "lenient_string")]
    pub subdirectory: String,
    #[serde(default, deserialize_with = "flexible_bool")]
    pub disabled: bool,
}

impl From<&ScheduledInput> for ScheduledInputDto {
    fn from(input: &ScheduledInput) -> Self {
        Self {
            title: input.title.clone(),
            description: input.description.clone().unwrap_or_default(),
            code: input.code.clone().unwrap_or_default(),
            cron_schedule: input.cron_schedule.clone().unwrap_or_default(),
            overwrite: input.overwrite.into(),
            subdirectory: input.subdirectory.clone().unwrap_or_default(),
            disabled: input.disabled,
        }
    }
}

/// Word characters, whitespace and `*/,-` only.
pub fn is_cron_like(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c.is_whitespace() || "*/,-".contains(c))
}

impl ScheduledInputDto {
    pub fn normalized(&self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            code: self.code.trim().to_string(),
            cron_schedule: self.cron_schedule.trim().to_string(),
            subdirectory: self.subdirectory.trim().to_string(),
            ..self.clone()
        }
    }

    /// Checks for a new input; description and subdirectory are optional.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() || self.code.trim().is_empty() {
            return Err("Please fill in all required fields.".into());
        }
        if !is_cron_like(self.cron_schedule.trim()) {
            return Err("Invalid cron schedule format.".into());
        }
        Ok(())
    }

    /// The edit form requires every text field.
    pub fn validate_update(&self) -> Result<(), String> {
        if self.description.trim().is_empty() || self.subdirectory.trim().is_empty() {
            return Err("Please fill in all required fields.".into());
        }
        self.validate()
    }

    /// Multipart fields for POST `/commit_scheduled_input`, which reads a
    /// form rather than JSON. `disabled` is only sent when checked.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("title", self.title.clone()),
            ("description", self.description.clone()),
            ("code", self.code.clone()),
            ("cron_schedule", self.cron_schedule.clone()),
            ("overwrite", self.overwrite.label().to_string()),
            ("subdirectory", self.subdirectory.clone()),
        ];
        if self.disabled {
            fields.push(("disabled", "on".to_string()));
        }
        fields
    }
}

/// Body of POST `/test_scheduled_input`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptTestRequest {
    pub code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ScriptTestResponse {
    #[serde(default)]
    pub df_summary: String,
}

/// Body of POST `/fetch_api_data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiDataRequest {
    pub api_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiDataResponse {
    #[serde(default)]
    pub api_data: Value,
}

pub const PREVIEW_MAX_LINES: usize = 2000;

/// Pretty-printed sample data, cut after `max_lines` lines.
pub fn preview_json(value: &Value, max_lines: usize) -> String {
    let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    let mut lines: Vec<&str> = pretty.lines().collect();
    if lines.len() <= max_lines {
        return pretty;
    }
    lines.truncate(max_lines);
    lines.push("... (truncated)");
    lines.join("\n")
}
