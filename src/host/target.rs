// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output format a page is rendered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Html,
    Pdf,
}

impl Target {
    pub fn as_str(&self) -> &'static str {
        match self {
            Target::Html => "html",
            Target::Pdf => "pdf",
        }
    }

    pub fn output_file_extension(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(Target::Html),
            "pdf" => Ok(Target::Pdf),
            other => Err(format!(
                "Unknown target '{}'. Valid options are: html, pdf",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays_targets() {
        assert_eq!("html".parse::<Target>().unwrap(), Target::Html);
        assert_eq!("PDF".parse::<Target>().unwrap(), Target::Pdf);
        assert!("epub".parse::<Target>().is_err());
        assert_eq!(Target::Pdf.to_string(), "pdf");
    }

    #[test]
    fn output_extension_matches_target() {
        assert_eq!(Target::Html.output_file_extension(), "html");
        assert_eq!(Target::Pdf.output_file_extension(), "pdf");
    }
}
