//! HUD template resolution
//!
//! Expands `{placeholder}` tokens in a label format string against live state.
//!
//! # Template syntax
//!
//! - Placeholders: `{tps}`, `{playercount}`, `{maxplayers}`, `{id}`, `{playername}`,
//!   `{role}`, `{time}`, `{rules}`, `{mtfspawnleft}`, `{chaosspawnleft}`,
//!   `{nextspawn}` (alias `{nextwave}`), `{spectated_name}`, `{spectated_id}`,
//!   `{spectated_role}`, `{spectatorcount}`, `{generatorcount}`, `{warhead}`
//! - Names are matched case-insensitively
//! - Unknown names and anything that is not `{word}` are copied verbatim
//! - Rich-text markup (`<color=red>`, `<size=20>`) is left untouched
//!
//! A placeholder whose value cannot be read is replaced by its fallback text;
//! the rest of the template still renders.

use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::debug;

use super::placeholder::Placeholder;
use super::role_catalog::RoleCatalog;
use super::rotation::RotatingMessageList;
use super::traits::{SessionInfo, StateQuery};

/// Everything a placeholder may read while one template is resolved
pub struct ResolveContext<'a> {
    pub state: &'a dyn StateQuery,
    /// Session the label is rendered for
    pub session: &'a SessionInfo,
    pub rotation: &'a Mutex<RotatingMessageList>,
    pub roles: &'a RoleCatalog,
    pub rotation_interval: Duration,
    pub now: Instant,
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Resolve every placeholder in `template`
pub fn resolve(template: &str, ctx: &ResolveContext<'_>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let name_len = after
            .char_indices()
            .find(|(_, c)| !is_word_char(*c))
            .map(|(i, _)| i)
            .unwrap_or(after.len());

        if name_len > 0 && after[name_len..].starts_with('}') {
            let name = &after[..name_len];
            let raw = &rest[open..open + name_len + 2];
            out.push_str(&substitute(name, raw, ctx));
            rest = &after[name_len + 1..];
        } else {
            // Not a token: keep the brace and rescan from the next character
            out.push('{');
            rest = after;
        }
    }

    out.push_str(rest);
    out
}

/// Value for one `{name}` token, `raw` being the token as written
fn substitute(name: &str, raw: &str, ctx: &ResolveContext<'_>) -> String {
    let Some(placeholder) = Placeholder::parse(name) else {
        return raw.to_string();
    };

    match placeholder.evaluate(ctx) {
        Ok(value) => value,
        Err(e) => {
            debug!(
                placeholder = name,
                session = %ctx.session.id,
                error = %e,
                "[HUD] Placeholder unavailable, using fallback"
            );
            placeholder.fallback(raw)
        }
    }
}

// =============================================================================
// TEST FIXTURES
// =============================================================================


#[cfg(test)]
mod tests {
    use super::fixtures::Fixture;
    use super::*;
    use crate::core::traits::{StateError, WaveQueueState};

    fn render(fixture: &Fixture, template: &str) -> String {
        resolve(template, &fixture.ctx())
    }

    #[test]
    fn test_empty_template() {
        assert_eq!(render(&Fixture::new(), ""), "");
    }

    #[test]
    fn test_plain_text_unchanged() {
        let fixture = Fixture::new();
        assert_eq!(
            render(&fixture, "<color=#42e9f5>Welcome</color>\nHave fun"),
            "<color=#42e9f5>Welcome</color>\nHave fun"
        );
    }

    #[test]
    fn test_known_placeholders() {
        let fixture = Fixture::new();
        assert_eq!(
            render(&fixture, "TPS: {tps} | {playercount}/{maxplayers} | {time}"),
            "TPS: 60.0 | 12/30 | 02:05"
        );
    }

    #[test]
    fn test_case_insensitive_names() {
        let fixture = Fixture::new();
        assert_eq!(render(&fixture, "{PlayerName} {TPS}"), "Alice 60.0");
    }

    #[test]
    fn test_unknown_placeholder_passthrough() {
        let fixture = Fixture::new();
        assert_eq!(render(&fixture, "{zone} {tps}"), "{zone} 60.0");
    }

    #[test]
    fn test_malformed_braces_passthrough() {
        let fixture = Fixture::new();
        assert_eq!(render(&fixture, "{ tps}"), "{ tps}");
        assert_eq!(render(&fixture, "{tps"), "{tps");
        assert_eq!(render(&fixture, "{}"), "{}");
        assert_eq!(render(&fixture, "}{"), "}{");
        assert_eq!(render(&fixture, "{tps-x}"), "{tps-x}");
    }

    #[test]
    fn test_nested_braces() {
        let fixture = Fixture::new();
        assert_eq!(render(&fixture, "{{time}}"), "{02:05}");
    }

    #[test]
    fn test_unicode_around_tokens() {
        let fixture = Fixture::new();
        assert_eq!(render(&fixture, "• {id} ✓"), "• 7 ✓");
        assert_eq!(render(&fixture, "{émoji}"), "{émoji}");
    }

    #[test]
    fn test_default_standard_format() {
        let fixture = Fixture::new();
        let template = "<color=red>NAME:</color>{playername} | <color=green>TIME:</color>{time} | \
                        <color=#42e9f5>TPS:</color>{tps} | <color=blue>ROLE:</color> {role} | \
                        <color=#777777>ID:</color>{id}\nNext Spawn: {nextspawn}";
        assert_eq!(
            render(&fixture, template),
            "<color=red>NAME:</color>Alice | <color=green>TIME:</color>02:05 | \
             <color=#42e9f5>TPS:</color>60.0 | <color=blue>ROLE:</color> \
             <color=#FF8E00>Class-D</color> | <color=#777777>ID:</color>7\nNext Spawn: N/A"
        );
    }

    #[test]
    fn test_failure_is_isolated_to_its_placeholder() {
        let mut fixture = Fixture::new();
        fixture.state.round_elapsed = Err(StateError::NotInitialized("round"));
        fixture.state.warhead = Err(StateError::Unavailable("warhead"));
        fixture.state.generators = Err(StateError::Unavailable("generators"));

        assert_eq!(
            render(&fixture, "{tps} {time} {warhead} {generatorcount} {id}"),
            "60.0 {time} Unknown 0/0 7"
        );
    }

    #[test]
    fn test_time_fallback_keeps_original_case() {
        let mut fixture = Fixture::new();
        fixture.state.round_elapsed = Err(StateError::NotInitialized("round"));
        assert_eq!(render(&fixture, "{Time}"), "{Time}");
    }

    #[test]
    fn test_wave_queue_failure_falls_back() {
        let mut fixture = Fixture::new();
        fixture.state.wave_queue_state = Err(StateError::NotInitialized("wave manager"));
        assert_eq!(render(&fixture, "{nextspawn}|{mtfspawnleft}"), "N/A|N/A");
    }

    #[test]
    fn test_spawning_renders_in_template() {
        let mut fixture = Fixture::new();
        fixture.state.wave_queue_state = Ok(WaveQueueState::WaveSelected);
        assert_eq!(render(&fixture, "Next: {nextwave}"), "Next: Spawning...");
    }

    #[test]
    fn test_rules_inside_template() {
        let fixture = Fixture::new();
        assert_eq!(
            render(&fixture, "<color=#ffcc00>{rules}</color>"),
            "<color=#ffcc00>Rule one</color>"
        );
    }
}
