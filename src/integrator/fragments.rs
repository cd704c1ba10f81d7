//! Text fragments written into the target files

use super::anchor::Placement;
use crate::service::ServiceDescriptor;

const ENV_DESCRIPTION_MAX_CHARS: usize = 100;
const REPORT_RULE: &str = "=================================";
const REPORT_RULE_TAIL: &str = "============================";

/// Escape for interpolation inside a double-quoted shell string.
pub fn shell_double_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' | '"' | '$' | '`' => {
                out.push('\\');
                out.push(c);
            }
            '\n' | '\r' => out.push(' '),
            _ => out.push(c),
        }
    }
    out
}

fn single_line(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn compose_service(d: &ServiceDescriptor) -> String {
    let host = d.hostname_var();
    let mut block = format!(
        "\n  {name}:\n    image: {image}\n    container_name: {name}\n    profiles: [\"{name}\"]\n    restart: unless-stopped\n    environment:\n      APP_URL: ${{{host}:+https://}}${{{host}}}\n",
        name = d.name,
        image = d.image,
        host = host,
    );

    if d.needs_postgres || d.needs_redis {
        block.push_str("    depends_on:\n");
        if d.needs_postgres {
            block.push_str("      postgres:\n        condition: service_healthy\n");
        }
        if d.needs_redis {
            block.push_str("      redis:\n        condition: service_healthy\n");
        }
    }
    block
}

pub fn compose_volume(d: &ServiceDescriptor) -> String {
    format!("  {}:\n", d.volume_name())
}

pub fn env_block(d: &ServiceDescriptor, domain: &str) -> String {
    let summary = single_line(&d.description);
    let summary: String = if summary.is_empty() {
        "Service configuration".to_string()
    } else {
        summary.chars().take(ENV_DESCRIPTION_MAX_CHARS).collect()
    };

    format!(
        "\n############\n# {display} Configuration\n# {summary}\n############\n{host_var}={hostname}.{domain}\n{secret_var}=\n",
        display = single_line(&d.display_name),
        summary = summary,
        host_var = d.hostname_var(),
        hostname = d.hostname,
        domain = domain,
        secret_var = d.secret_var(),
    )
}

/// Caddy site block keyed on the `{$VAR}` environment placeholder.
pub fn caddy_block(d: &ServiceDescriptor) -> String {
    format!(
        "\n# {display}\n{{${host_var}}} {{\n    reverse_proxy {name}:{port}\n}}\n",
        display = single_line(&d.display_name),
        host_var = d.hostname_var(),
        name = d.name,
        port = d.port,
    )
}

pub fn wizard_entry(d: &ServiceDescriptor) -> String {
    format!(
        "    \"{}\" \"{}\"\n",
        d.name,
        shell_double_quoted(&d.display_name)
    )
}

pub fn secret_declaration(d: &ServiceDescriptor) -> String {
    format!("    [\"{}\"]=\"hex:64\"\n", d.secret_var())
}

/// The report block, with its blank-line separator on the side facing the
/// anchor.
pub fn report_section(d: &ServiceDescriptor, placement: Placement) -> String {
    let host = format!("${{{}:-<hostname_not_set>}}", d.hostname_var());
    let block = format!(
        "if is_profile_active \"{name}\"; then\n  echo\n  echo \"{rule} {display} {tail}\"\n  echo\n  echo \"Host: {host}\"\n  echo \"Description: {description}\"\n  echo\n  echo \"First Time Setup:\"\n  echo \"  - Visit https://{host}\"\n  echo \"  - Create your admin account\"\nfi\n",
        name = d.name,
        rule = REPORT_RULE,
        display = shell_double_quoted(&d.display_name),
        tail = REPORT_RULE_TAIL,
        host = host,
        description = shell_double_quoted(&d.description),
    );

    match placement {
        Placement::After => format!("\n{}", block),
        Placement::Before => format!("{}\n", block),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> ServiceDescriptor {
        ServiceDescriptor {
            name: "wiki-js".to_string(),
            display_name: "Wiki.js".to_string(),
            description: "A \"modern\" wiki, costs $0".to_string(),
            port: "3000".to_string(),
            image: "ghcr.io/requarks/wiki:2".to_string(),
            hostname: "wiki".to_string(),
            needs_postgres: true,
            needs_redis: false,
        }
    }

    #[test]
    fn test_shell_escaping() {
        assert_eq!(shell_double_quoted(r#"a"b$c`d\e"#), r#"a\"b\$c\`d\\e"#);
        assert_eq!(shell_double_quoted("two\nlines"), "two lines");
    }

    #[test]
    fn test_compose_service_block() {
        let block = compose_service(&descriptor());
        assert_eq!(
            block,
            "\n  wiki-js:\n    image: ghcr.io/requarks/wiki:2\n    container_name: wiki-js\n    profiles: [\"wiki-js\"]\n    restart: unless-stopped\n    environment:\n      APP_URL: ${WIKI_JS_HOSTNAME:+https://}${WIKI_JS_HOSTNAME}\n    depends_on:\n      postgres:\n        condition: service_healthy\n"
        );
    }

    #[test]
    fn test_compose_service_without_dependencies() {
        let mut d = descriptor();
        d.needs_postgres = false;
        assert!(!compose_service(&d).contains("depends_on"));

        d.needs_redis = true;
        let block = compose_service(&d);
        assert!(block.contains("    depends_on:\n      redis:\n"));
        assert!(!block.contains("postgres"));
    }

    #[test]
    fn test_env_block() {
        let block = env_block(&descriptor(), "example.org");
        assert_eq!(
            block,
            "\n############\n# Wiki.js Configuration\n# A \"modern\" wiki, costs $0\n############\nWIKI_JS_HOSTNAME=wiki.example.org\nWIKI_JS_APP_SECRET=\n"
        );
    }

    #[test]
    fn test_env_block_defaults_and_truncates_description() {
        let mut d = descriptor();
        d.description = String::new();
        assert!(env_block(&d, "x.io").contains("# Service configuration\n"));

        d.description = "w".repeat(150);
        let block = env_block(&d, "x.io");
        assert!(block.contains(&format!("# {}\n", "w".repeat(100))));
    }

    #[test]
    fn test_caddy_block() {
        assert_eq!(
            caddy_block(&descriptor()),
            "\n# Wiki.js\n{$WIKI_JS_HOSTNAME} {\n    reverse_proxy wiki-js:3000\n}\n"
        );
    }

    #[test]
    fn test_wizard_and_secret_lines() {
        assert_eq!(wizard_entry(&descriptor()), "    \"wiki-js\" \"Wiki.js\"\n");
        assert_eq!(
            secret_declaration(&descriptor()),
            "    [\"WIKI_JS_APP_SECRET\"]=\"hex:64\"\n"
        );
    }

    #[test]
    fn test_report_section_separator_side() {
        let after = report_section(&descriptor(), Placement::After);
        let before = report_section(&descriptor(), Placement::Before);

        assert!(after.starts_with("\nif is_profile_active \"wiki-js\"; then\n"));
        assert!(after.ends_with("fi\n"));
        assert!(before.starts_with("if is_profile_active"));
        assert!(before.ends_with("fi\n\n"));
        assert!(after.contains("echo \"Description: A \\\"modern\\\" wiki, costs \\$0\""));
        assert!(after.contains("echo \"Host: ${WIKI_JS_HOSTNAME:-<hostname_not_set>}\""));
    }
}
