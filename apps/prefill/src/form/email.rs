#![allow(dead_code)]
use std::sync::LazyLock;

use regex::Regex;

pub const DEFAULT_DOMAINS: &[&str] = &[
    "gmail.com",
    "naver.com",
    "daum.net",
    "hanmail.net",
    "kakao.com",
    "nate.com",
    "outlook.com",
    "icloud.com",
];

const INVALID_MESSAGE: &str = "유효한 이메일 형식을 입력해 주세요.";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%\&'*+/=?^_`{|}\~\-]+@[A-Za-z0-9\-]+(?:\.[A-Za-z0-9\-]+)+$")
        .expect("email pattern is valid")
});

pub fn is_valid_email(s: &str) -> bool {
    EMAIL_PATTERN.is_match(s)
}

/// Splits at the first `@`. Without one the whole (trimmed) value is the local part.
pub fn split_email(value: &str) -> (String, String) {
    let s = value.trim();
    match s.split_once('@') {
        Some((local, domain)) => (local.to_string(), domain.to_string()),
        None => (s.to_string(), String::new()),
    }
}

pub fn compose_email(local: &str, domain: &str) -> String {
    if domain.is_empty() {
        local.to_string()
    } else {
        format!("{local}@{domain}")
    }
}

/// Email control edited as separate local and domain parts.
#[derive(Debug, Clone)]
pub struct EmailField {
    local: String,
    domain: String,
    pub required: bool,
    domains: Vec<String>,
}

impl Default for EmailField {
    fn default() -> Self {
        Self::new(true)
    }
}

impl EmailField {
    pub fn new(required: bool) -> Self {
        Self {
            local: String::new(),
            domain: String::new(),
            required,
            domains: DEFAULT_DOMAINS.iter().map(|d| d.to_string()).collect(),
        }
    }

    /// Replaces the whole address, e.g. when syncing from an externally loaded value.
    pub fn set_value(&mut self, value: &str) {
        let (local, domain) = split_email(value);
        self.local = local;
        self.domain = domain;
    }

    pub fn set_local(&mut self, local: &str) {
        self.local = local.to_string();
    }

    pub fn set_domain(&mut self, domain: &str) {
        self.domain = domain.to_lowercase();
    }

    /// Picks one of the suggested domains. An empty pick is ignored.
    pub fn select_domain(&mut self, domain: &str) {
        if domain.is_empty() {
            return;
        }
        self.domain = domain.to_lowercase();
    }

    pub fn local(&self) -> &str {
        &self.local
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn suggestions(&self) -> &[String] {
        &self.domains
    }

    pub fn value(&self) -> String {
        compose_email(&self.local, &self.domain)
    }

    pub fn is_valid(&self) -> bool {
        let value = self.value();
        if value.trim().is_empty() {
            return !self.required;
        }
        is_valid_email(&value)
    }

    pub fn error(&self) -> Option<&'static str> {
        (!self.is_valid()).then_some(INVALID_MESSAGE)
    }
}
