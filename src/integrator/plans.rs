//! Anchor tables for each target file
//!
//! The reference services (`outline`, `docmost`, `paddleocr`, `python-runner`)
//! are entries the stock deployment scripts ship with; new services are
//! slotted in next to them so the files keep their grouping.

use super::anchor::{AnchorRule, Fallback, InsertionPlan};
use once_cell::sync::Lazy;
use regex::Regex;

pub static COMPOSE_SERVICES_SECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^services:[ \t]*(?:#.*)?$").expect("valid regex"));

pub static COMPOSE_VOLUMES_SECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^volumes:[ \t]*\n").expect("valid regex"));

pub static WIZARD_OUTLINE_ENTRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?m)^[ \t]*"outline"[ \t]+"[^\n]*\n"#).expect("valid regex"));

pub static WIZARD_DOCMOST_ENTRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?m)^[ \t]*"docmost"[ \t]+"[^\n]*\n"#).expect("valid regex"));

pub static WIZARD_DATA_OPEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*base_services_data=\([ \t]*\n").expect("valid regex")
});

pub static SECRET_OUTLINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^[^\n]*\["OUTLINE_APP_SECRET"\]=[^\n]*\n"#).expect("valid regex")
});

pub static SECRET_DOCMOST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^[^\n]*\["DOCMOST_APP_SECRET"\]=[^\n]*\n"#).expect("valid regex")
});

/// Line holding the closing `)` of the first array assignment (`NAME=(` or `declare -A NAME=(`).
pub static SECRETS_ARRAY_CLOSE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?ms)^[ \t]*(?:declare[ \t]+-[aA][ \t]+)?\w+=\([ \t]*\n.*?^(?P<at>[ \t]*\))")
        .expect("valid regex")
});

/// `if is_profile_active "outline"; then` through its unindented `fi`.
pub static REPORT_OUTLINE_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?ms)^if is_profile_active "outline"; then\n.*?^fi[ \t]*(?:\n|\z)"#)
        .expect("valid regex")
});

pub static REPORT_DOCMOST_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?ms)^if is_profile_active "docmost"; then\n.*?^fi[ \t]*(?:\n|\z)"#)
        .expect("valid regex")
});

pub static REPORT_PADDLEOCR_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?m)^if is_profile_active "paddleocr""#).expect("valid regex"));

pub static REPORT_PYTHON_RUNNER_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^if is_profile_active "python-runner""#).expect("valid regex")
});

/// New service stanza: end of the `services:` section, else end of file.
pub fn compose_service() -> InsertionPlan {
    InsertionPlan::new(
        vec![AnchorRule::section_end(
            "services section",
            &COMPOSE_SERVICES_SECTION,
        )],
        Fallback::AppendToEnd,
    )
}

/// Named volume: right after the top-level `volumes:` line.
pub fn compose_volume() -> InsertionPlan {
    InsertionPlan::new(
        vec![AnchorRule::after("volumes section", &COMPOSE_VOLUMES_SECTION)],
        Fallback::Skip,
    )
}

pub fn wizard_entry() -> InsertionPlan {
    InsertionPlan::new(
        vec![
            AnchorRule::after("outline entry", &WIZARD_OUTLINE_ENTRY),
            AnchorRule::after("docmost entry", &WIZARD_DOCMOST_ENTRY),
            AnchorRule::after("base_services_data", &WIZARD_DATA_OPEN),
        ],
        Fallback::Skip,
    )
}

pub fn secret_declaration() -> InsertionPlan {
    InsertionPlan::new(
        vec![
            AnchorRule::after("OUTLINE_APP_SECRET", &SECRET_OUTLINE),
            AnchorRule::after("DOCMOST_APP_SECRET", &SECRET_DOCMOST),
            AnchorRule::before("secrets block end", &SECRETS_ARRAY_CLOSE),
        ],
        Fallback::Skip,
    )
}

pub fn report_section() -> InsertionPlan {
    InsertionPlan::new(
        vec![
            AnchorRule::after("outline report", &REPORT_OUTLINE_BLOCK),
            AnchorRule::after("docmost report", &REPORT_DOCMOST_BLOCK),
            AnchorRule::before("paddleocr report", &REPORT_PADDLEOCR_START),
            AnchorRule::before("python-runner report", &REPORT_PYTHON_RUNNER_START),
        ],
        Fallback::Skip,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrator::anchor::Via;

    fn line(_: crate::integrator::anchor::Placement) -> String {
        "NEW\n".to_string()
    }

    #[test]
    fn test_volumes_anchor_is_top_level_only() {
        let content = "services:\n  db:\n    volumes:\n      - x:/y\nvolumes:\n  pg_data:\n";
        let (out, via) = compose_volume().apply(content, line);
        assert_eq!(via, Via::Anchor("volumes section"));
        assert_eq!(
            out.as_deref(),
            Some("services:\n  db:\n    volumes:\n      - x:/y\nvolumes:\nNEW\n  pg_data:\n")
        );
    }

    #[test]
    fn test_volume_skipped_without_section() {
        let (out, via) = compose_volume().apply("services:\n  a:\n", line);
        assert_eq!(out, None);
        assert_eq!(via, Via::Skipped);
    }

    #[test]
    fn test_wizard_prefers_outline_over_docmost() {
        let content = "base_services_data=(\n    \"docmost\" \"Docmost\"\n    \"outline\" \"Outline (wiki)\"\n    \"n8n\" \"n8n\"\n)\n";
        let (out, via) = wizard_entry().apply(content, line);
        assert_eq!(via, Via::Anchor("outline entry"));
        assert!(out.unwrap().contains("\"Outline (wiki)\"\nNEW\n    \"n8n\""));
    }

    #[test]
    fn test_wizard_falls_back_to_block_opening() {
        let content = "#!/bin/bash\nbase_services_data=(\n    \"n8n\" \"n8n\"\n)\n";
        let (out, via) = wizard_entry().apply(content, line);
        assert_eq!(via, Via::Anchor("base_services_data"));
        assert_eq!(
            out.as_deref(),
            Some("#!/bin/bash\nbase_services_data=(\nNEW\n    \"n8n\" \"n8n\"\n)\n")
        );
    }

    #[test]
    fn test_secrets_fall_back_before_closing_paren() {
        let content = "declare -A VARS_TO_GENERATE=(\n    [\"N8N_KEY\"]=\"hex:64\"\n)\n\nfor k in x; do\n  echo\ndone\n";
        let (out, via) = secret_declaration().apply(content, line);
        assert_eq!(via, Via::Anchor("secrets block end"));
        assert_eq!(
            out.as_deref(),
            Some("declare -A VARS_TO_GENERATE=(\n    [\"N8N_KEY\"]=\"hex:64\"\nNEW\n)\n\nfor k in x; do\n  echo\ndone\n")
        );
    }

    #[test]
    fn test_secrets_indented_closing_paren_kept_intact() {
        let content = "setup() {\n  VARS=(\n    [\"N8N_KEY\"]=\"hex:64\"\n  )\n}\n";
        let (out, via) = secret_declaration().apply(content, |_| "    NEW\n".to_string());
        assert_eq!(via, Via::Anchor("secrets block end"));
        assert_eq!(
            out.as_deref(),
            Some("setup() {\n  VARS=(\n    [\"N8N_KEY\"]=\"hex:64\"\n    NEW\n  )\n}\n")
        );
    }

    #[test]
    fn test_secrets_prefer_outline() {
        let content = "VARS=(\n    [\"DOCMOST_APP_SECRET\"]=\"hex:64\"\n    [\"OUTLINE_APP_SECRET\"]=\"hex:64\"\n)\n";
        let (_, via) = secret_declaration().apply(content, line);
        assert_eq!(via, Via::Anchor("OUTLINE_APP_SECRET"));
    }

    #[test]
    fn test_report_block_match_is_non_greedy() {
        let content = "if is_profile_active \"outline\"; then\n  if true; then\n    echo\n  fi\nfi\n\nif is_profile_active \"n8n\"; then\n  echo\nfi\n";
        let (out, via) = report_section().apply(content, line);
        assert_eq!(via, Via::Anchor("outline report"));
        assert!(out
            .unwrap()
            .starts_with("if is_profile_active \"outline\"; then\n  if true; then\n    echo\n  fi\nfi\nNEW\n\nif is_profile_active \"n8n\""));
    }

    #[test]
    fn test_report_falls_back_to_before_python_runner() {
        let content = "echo start\nif is_profile_active \"python-runner\"; then\n  echo\nfi\n";
        let (out, via) = report_section().apply(content, line);
        assert_eq!(via, Via::Anchor("python-runner report"));
        assert_eq!(
            out.as_deref(),
            Some("echo start\nNEW\nif is_profile_active \"python-runner\"; then\n  echo\nfi\n")
        );
    }

    #[test]
    fn test_report_skipped_without_anchors() {
        let (out, via) = report_section().apply("echo done\n", line);
        assert_eq!(out, None);
        assert_eq!(via, Via::Skipped);
    }
}
