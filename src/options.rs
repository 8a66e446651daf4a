use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pattern::DEFAULT_PARAM_PATTERN;

pub const DEFAULT_ACTION: &str = "index";
pub const DEFAULT_PROTOCOL: &str = "http";
pub const DEFAULT_LOCAL_HOSTS: [&str; 3] = ["", "local", "localhost"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DuplicatePolicy {
    /// Last registration under a name wins.
    #[default]
    Replace,
    Reject,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngineOptions {
    pub default_action: String,
    pub default_protocol: String,
    pub default_param_pattern: String,
    pub local_hosts: Vec<String>,
    pub trusted_hosts: Vec<String>,
    pub duplicate_policy: DuplicatePolicy,
    pub base_url: String,
    pub index_file: String,
    pub site_host: Option<String>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            default_action: DEFAULT_ACTION.to_string(),
            default_protocol: DEFAULT_PROTOCOL.to_string(),
            default_param_pattern: DEFAULT_PARAM_PATTERN.to_string(),
            local_hosts: DEFAULT_LOCAL_HOSTS.iter().map(|h| h.to_string()).collect(),
            trusted_hosts: Vec::new(),
            duplicate_policy: DuplicatePolicy::default(),
            base_url: "/".to_string(),
            index_file: String::new(),
            site_host: None,
        }
    }
}

impl EngineOptions {
    pub fn builder() -> EngineOptionsBuilder {
        EngineOptionsBuilder::default()
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.default_action.trim().is_empty() {
            return Err(OptionsError::EmptyDefaultAction);
        }
        if self.default_protocol.is_empty()
            || !self
                .default_protocol
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        {
            return Err(OptionsError::InvalidProtocol {
                value: self.default_protocol.clone(),
            });
        }
        if let Err(err) = Regex::new(&format!("^(?:{})$", self.default_param_pattern)) {
            return Err(OptionsError::InvalidParamPattern {
                pattern: self.default_param_pattern.clone(),
                error: err.to_string(),
            });
        }
        for pattern in &self.trusted_hosts {
            if let Err(err) = Regex::new(&format!("^(?:{})$", pattern)) {
                return Err(OptionsError::InvalidTrustedHost {
                    pattern: pattern.clone(),
                    error: err.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct EngineOptionsBuilder {
    options: EngineOptions,
}

impl EngineOptionsBuilder {
    pub fn default_action<S: Into<String>>(mut self, value: S) -> Self {
        self.options.default_action = value.into();
        self
    }

    pub fn default_protocol<S: Into<String>>(mut self, value: S) -> Self {
        self.options.default_protocol = value.into();
        self
    }

    pub fn default_param_pattern<S: Into<String>>(mut self, value: S) -> Self {
        self.options.default_param_pattern = value.into();
        self
    }

    pub fn local_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.local_hosts = hosts.into_iter().map(Into::into).collect();
        self
    }

    pub fn trusted_hosts<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.trusted_hosts = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn duplicate_policy(mut self, value: DuplicatePolicy) -> Self {
        self.options.duplicate_policy = value;
        self
    }

    pub fn base_url<S: Into<String>>(mut self, value: S) -> Self {
        self.options.base_url = value.into();
        self
    }

    pub fn index_file<S: Into<String>>(mut self, value: S) -> Self {
        self.options.index_file = value.into();
        self
    }

    pub fn site_host<S: Into<String>>(mut self, value: S) -> Self {
        self.options.site_host = Some(value.into());
        self
    }

    pub fn build(self) -> Result<EngineOptions, OptionsError> {
        let options = self.options;
        options.validate()?;
        Ok(options)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
    #[error("default action must not be empty")]
    EmptyDefaultAction,
    #[error("'{value}' is not a valid protocol")]
    InvalidProtocol { value: String },
    #[error("default parameter pattern '{pattern}' is invalid: {error}")]
    InvalidParamPattern { pattern: String, error: String },
    #[error("trusted host pattern '{pattern}' is invalid: {error}")]
    InvalidTrustedHost { pattern: String, error: String },
}
