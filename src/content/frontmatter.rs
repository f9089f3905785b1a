//! Front-matter parsing and serialization

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::error::HeaderError;
use crate::helpers::parse_date_string;

/// Delimiter style of a metadata header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HeaderFormat {
    /// `---` fenced YAML
    #[default]
    Yaml,
    /// `+++` fenced TOML
    Toml,
    /// A leading JSON object, or one fenced by `;;;`
    Json,
}

/// Metadata header of a post
#[derive(Debug, Clone, PartialEq)]
pub struct FrontMatter {
    pub title: String,
    date: NaiveDate,
    /// The `date` value as written, so a rewrite keeps its precision
    date_text: String,
    pub draft: bool,
    /// All other header fields, in file order
    pub extra: IndexMap<String, Value>,
    pub format: HeaderFormat,
    /// Paths of fields that were TOML datetimes, written back as datetime literals
    toml_datetimes: HashSet<String>,
}

impl FrontMatter {
    /// Build a header for a new post
    pub fn new(
        title: impl Into<String>,
        date: NaiveDate,
        draft: bool,
        format: HeaderFormat,
    ) -> Self {
        Self {
            title: title.into(),
            date,
            date_text: date.format("%Y-%m-%d").to_string(),
            draft,
            extra: IndexMap::new(),
            format,
            toml_datetimes: match format {
                HeaderFormat::Toml => HashSet::from(["date".to_string()]),
                _ => HashSet::new(),
            },
        }
    }

    /// Calendar date of the post
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The `date` field exactly as it appears in the header
    pub fn date_text(&self) -> &str {
        &self.date_text
    }

    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), HeaderError> {
        let content = content.trim_start_matches('\u{feff}').trim_start();

        let mut toml_datetimes = HashSet::new();
        let (format, fields, rest) = if content.starts_with("---") {
            let (block, rest) = split_fenced(content, "---")?;
            (HeaderFormat::Yaml, parse_yaml(block)?, rest)
        } else if content.starts_with("+++") {
            let (block, rest) = split_fenced(content, "+++")?;
            (
                HeaderFormat::Toml,
                parse_toml(block, &mut toml_datetimes)?,
                rest,
            )
        } else if let Some(inner) = content.strip_prefix(";;;") {
            let end = inner.find(";;;").ok_or(HeaderError::Unterminated(";;;"))?;
            (
                HeaderFormat::Json,
                parse_json(&inner[..end])?,
                &inner[end + 3..],
            )
        } else if content.starts_with('{') {
            let (fields, end) = parse_json_prefix(content)?;
            (HeaderFormat::Json, fields, &content[end..])
        } else {
            return Err(HeaderError::Missing);
        };

        let mut fm = Self::from_fields(fields, format)?;
        fm.toml_datetimes = toml_datetimes;
        Ok((fm, rest.trim_start_matches(['\n', '\r'])))
    }

    /// Pull the known fields out of a decoded header, keeping the rest in order
    fn from_fields(
        fields: Map<String, Value>,
        format: HeaderFormat,
    ) -> Result<Self, HeaderError> {
        let mut title = None;
        let mut date = None;
        let mut draft = false;
        let mut extra = IndexMap::new();

        for (key, value) in fields {
            match key.as_str() {
                "title" => title = Some(read_title(value)?),
                "date" => date = Some(read_date(value)?),
                "draft" => draft = read_draft(value)?,
                _ => {
                    extra.insert(key, value);
                }
            }
        }

        let title = title.ok_or(HeaderError::MissingField("title"))?;
        let (date, date_text) = date.ok_or(HeaderError::MissingField("date"))?;

        Ok(Self {
            title,
            date,
            date_text,
            draft,
            extra,
            format,
            toml_datetimes: HashSet::new(),
        })
    }

    /// All header fields as an ordered map: title, date, draft, then extras
    fn fields(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("title".to_string(), Value::String(self.title.clone()));
        map.insert("date".to_string(), Value::String(self.date_text.clone()));
        map.insert("draft".to_string(), Value::Bool(self.draft));
        for (key, value) in &self.extra {
            map.insert(key.clone(), value.clone());
        }
        map
    }

    /// Serialize the header, delimiters included, in its own format
    pub fn to_header(&self) -> Result<String, HeaderError> {
        let fields = self.fields();
        match self.format {
            HeaderFormat::Yaml => {
                let yaml = serde_yaml::to_string(&fields)
                    .map_err(|e| HeaderError::Syntax(e.to_string()))?;
                Ok(format!("---\n{}---\n", yaml))
            }
            HeaderFormat::Toml => {
                let table: toml::Table = fields
                    .into_iter()
                    .filter_map(|(k, v)| {
                        json_to_toml(v, &k, &self.toml_datetimes).map(|v| (k, v))
                    })
                    .collect();
                let text =
                    toml::to_string(&table).map_err(|e| HeaderError::Syntax(e.to_string()))?;
                Ok(format!("+++\n{}+++\n", text))
            }
            HeaderFormat::Json => {
                let json = serde_json::to_string_pretty(&fields)
                    .map_err(|e| HeaderError::Syntax(e.to_string()))?;
                Ok(format!("{}\n", json))
            }
        }
    }
}

/// Split a `delim`-fenced block off the top of `content`.
/// Returns (block, remaining_content)
fn split_fenced<'a>(
    content: &'a str,
    delim: &'static str,
) -> Result<(&'a str, &'a str), HeaderError> {
    let rest = content[delim.len()..].trim_start_matches([' ', '\t']);
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))
        .ok_or(HeaderError::Missing)?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == delim {
            return Ok((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }

    Err(HeaderError::Unterminated(delim))
}

fn parse_yaml(block: &str) -> Result<Map<String, Value>, HeaderError> {
    if block.trim().is_empty() {
        return Ok(Map::new());
    }
    let value: Value =
        serde_yaml::from_str(block).map_err(|e| HeaderError::Syntax(e.to_string()))?;
    into_object(value)
}

fn parse_toml(
    block: &str,
    datetimes: &mut HashSet<String>,
) -> Result<Map<String, Value>, HeaderError> {
    let table: toml::Table =
        toml::from_str(block).map_err(|e| HeaderError::Syntax(e.to_string()))?;
    Ok(table
        .into_iter()
        .map(|(k, v)| {
            let value = toml_to_json(v, &k, datetimes);
            (k, value)
        })
        .collect())
}

fn parse_json(block: &str) -> Result<Map<String, Value>, HeaderError> {
    let value: Value =
        serde_json::from_str(block).map_err(|e| HeaderError::Syntax(e.to_string()))?;
    into_object(value)
}

/// Decode the JSON object at the start of `content`, returning it and its end offset
fn parse_json_prefix(content: &str) -> Result<(Map<String, Value>, usize), HeaderError> {
    let mut stream = serde_json::Deserializer::from_str(content).into_iter::<Value>();
    match stream.next() {
        Some(Ok(value)) => Ok((into_object(value)?, stream.byte_offset())),
        Some(Err(e)) if e.is_eof() => Err(HeaderError::Unterminated("}")),
        Some(Err(e)) => Err(HeaderError::Syntax(e.to_string())),
        None => Err(HeaderError::Missing),
    }
}

fn into_object(value: Value) -> Result<Map<String, Value>, HeaderError> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        _ => Err(HeaderError::Syntax(
            "header must be a map of fields".to_string(),
        )),
    }
}

fn read_title(value: Value) -> Result<String, HeaderError> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Ok(s),
        Value::String(_) => Err(HeaderError::InvalidField {
            field: "title",
            reason: "must not be empty".to_string(),
        }),
        other => Err(HeaderError::InvalidField {
            field: "title",
            reason: format!("expected a string, found {}", kind(&other)),
        }),
    }
}

fn read_date(value: Value) -> Result<(NaiveDate, String), HeaderError> {
    match value {
        Value::String(s) => match parse_date_string(&s) {
            Some(date) => Ok((date, s)),
            None => Err(HeaderError::InvalidField {
                field: "date",
                reason: format!("unrecognized date '{}'", s),
            }),
        },
        other => Err(HeaderError::InvalidField {
            field: "date",
            reason: format!("expected a date, found {}", kind(&other)),
        }),
    }
}

fn read_draft(value: Value) -> Result<bool, HeaderError> {
    match value {
        Value::Bool(b) => Ok(b),
        Value::Null => Ok(false),
        other => Err(HeaderError::InvalidField {
            field: "draft",
            reason: format!("expected true or false, found {}", kind(&other)),
        }),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a map",
    }
}

fn child_path(parent: &str, key: &str) -> String {
    format!("{}/{}", parent, key)
}

/// TOML datetimes become their RFC 3339 text; their paths go into `datetimes`
fn toml_to_json(value: toml::Value, path: &str, datetimes: &mut HashSet<String>) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => {
            datetimes.insert(path.to_string());
            Value::String(dt.to_string())
        }
        toml::Value::Array(items) => Value::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(i, v)| toml_to_json(v, &child_path(path, &i.to_string()), datetimes))
                .collect(),
        ),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| {
                    let value = toml_to_json(v, &child_path(path, &k), datetimes);
                    (k, value)
                })
                .collect(),
        ),
    }
}

/// Only strings at a recorded datetime path become datetime literals again.
/// TOML has no null, so nulls are dropped.
fn json_to_toml(value: Value, path: &str, datetimes: &HashSet<String>) -> Option<toml::Value> {
    Some(match value {
        Value::Null => return None,
        Value::Bool(b) => toml::Value::Boolean(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => toml::Value::Integer(i),
            None => toml::Value::Float(n.as_f64()?),
        },
        Value::String(s) if datetimes.contains(path) => {
            match s.parse::<toml::value::Datetime>() {
                Ok(dt) => toml::Value::Datetime(dt),
                Err(_) => toml::Value::String(s),
            }
        }
        Value::String(s) => toml::Value::String(s),
        Value::Array(items) => toml::Value::Array(
            items
                .into_iter()
                .enumerate()
                .filter_map(|(i, v)| json_to_toml(v, &child_path(path, &i.to_string()), datetimes))
                .collect(),
        ),
        Value::Object(map) => toml::Value::Table(
            map.into_iter()
                .filter_map(|(k, v)| {
                    let value = json_to_toml(v, &child_path(path, &k), datetimes)?;
                    Some((k, value))
                })
                .collect(),
        ),
    })
}
