//! Blog-wide global data resolved from the environment.
//!
//! | Variable           | Field        | Default                        |
//! |--------------------|--------------|--------------------------------|
//! | `BLOG_NAME`        | `name`       | 鲨鱼辣椒侦探                   |
//! | `BLOG_TITLE`       | `blogTitle`  | 人生笔记                       |
//! | `BLOG_FOOTER_TEXT` | `footerText` | 永远相信美好的事情即将发生     |
//!
//! Set values are percent-decoded. Unset or empty values take the default.
//! A set value that does not decode fails the whole resolution.

use crate::config::{EnvError, EnvParser, EnvSource, ProcessEnv, Sourced};
use serde::{Deserialize, Serialize};

pub const DEFAULT_NAME: &str = "鲨鱼辣椒侦探";
pub const DEFAULT_BLOG_TITLE: &str = "人生笔记";
pub const DEFAULT_FOOTER_TEXT: &str = "永远相信美好的事情即将发生";

// Suffixes after the parser's BLOG_ prefix.
const NAME_KEY: &str = "NAME";
const BLOG_TITLE_KEY: &str = "TITLE";
const FOOTER_TEXT_KEY: &str = "FOOTER_TEXT";

/// The resolved blog configuration record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalData {
    pub name: String,
    pub blog_title: String,
    pub footer_text: String,
}

impl Default for GlobalData {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            blog_title: DEFAULT_BLOG_TITLE.to_string(),
            footer_text: DEFAULT_FOOTER_TEXT.to_string(),
        }
    }
}

impl GlobalData {
    /// Resolve from the process environment.
    pub fn from_env() -> Result<Self, EnvError> {
        Self::resolve(&ProcessEnv)
    }

    /// Resolve from the given environment.
    ///
    /// # Errors
    ///
    /// [`EnvError::Decoding`] if a set variable is not valid percent-encoded
    /// text, or [`EnvError::NotUnicode`] if it is not valid Unicode.
    pub fn resolve<E: EnvSource + ?Sized>(env: &E) -> Result<Self, EnvError> {
        Ok(Self::resolve_sourced(env)?.into_data())
    }

    /// Resolve, keeping track of where each field came from.
    pub fn resolve_sourced<E: EnvSource + ?Sized>(env: &E) -> Result<GlobalDataReport, EnvError> {
        let parser = EnvParser::new(env);
        Ok(GlobalDataReport {
            name: parser.get_decoded_string(NAME_KEY, DEFAULT_NAME)?,
            blog_title: parser.get_decoded_string(BLOG_TITLE_KEY, DEFAULT_BLOG_TITLE)?,
            footer_text: parser.get_decoded_string(FOOTER_TEXT_KEY, DEFAULT_FOOTER_TEXT)?,
        })
    }

    /// Report every variable that would make [`GlobalData::resolve`] fail.
    pub fn check<E: EnvSource + ?Sized>(env: &E) -> Vec<EnvError> {
        let parser = EnvParser::new(env);
        [
            (NAME_KEY, DEFAULT_NAME),
            (BLOG_TITLE_KEY, DEFAULT_BLOG_TITLE),
            (FOOTER_TEXT_KEY, DEFAULT_FOOTER_TEXT),
        ]
        .into_iter()
        .filter_map(|(key, default)| parser.get_decoded_string(key, default).err())
        .collect()
    }

    /// Variable name and value for each field, in declaration order.
    pub fn env_pairs(&self) -> [(&'static str, &str); 3] {
        [
            ("BLOG_NAME", self.name.as_str()),
            ("BLOG_TITLE", self.blog_title.as_str()),
            ("BLOG_FOOTER_TEXT", self.footer_text.as_str()),
        ]
    }
}

/// [`GlobalData`] with per-field source tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalDataReport {
    pub name: Sourced<String>,
    pub blog_title: Sourced<String>,
    pub footer_text: Sourced<String>,
}

impl GlobalDataReport {
    pub fn into_data(self) -> GlobalData {
        GlobalData {
            name: self.name.into_value(),
            blog_title: self.blog_title.into_value(),
            footer_text: self.footer_text.into_value(),
        }
    }

    /// Variable name and sourced value for each field.
    pub fn entries(&self) -> [(&'static str, &Sourced<String>); 3] {
        [
            ("BLOG_NAME", &self.name),
            ("BLOG_TITLE", &self.blog_title),
            ("BLOG_FOOTER_TEXT", &self.footer_text),
        ]
    }
}
