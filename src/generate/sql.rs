//! PostgreSQL state-machine generator.
//!
//! Emits a scalar mapping function with the same transition logic as the
//! table and an aggregate that folds a column of events through it, so a
//! history of inputs can be replayed entirely inside the database.

use crate::core::{ConfigData, State, Symbol, Transducer, TransitionTriple};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors from generating SQL with explicit options.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SqlError {
    #[error("'{identifier}' is not a valid SQL identifier")]
    InvalidIdentifier { identifier: String },
}

/// Check if `name` is an unquoted SQL identifier: an ASCII letter or `_`
/// followed by ASCII letters, digits or `_`.
pub fn is_sql_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Naming options for the generated SQL objects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SqlOptions {
    /// Schema to create both objects in; unqualified when `None`
    pub schema: Option<String>,
    /// Appended to the transducer name to name the mapping function
    pub transition_suffix: String,
    /// Appended to the transducer name to name the aggregate
    pub aggregate_suffix: String,
}

impl Default for SqlOptions {
    fn default() -> Self {
        Self {
            schema: None,
            transition_suffix: "_transition".to_string(),
            aggregate_suffix: "_fsm".to_string(),
        }
    }
}

/// The two generated statements.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SqlArtifact {
    /// `<name>_transition(state text, event text) RETURNS text`
    pub transition_function: String,
    /// `<name>_fsm(text)`, seeded with the initial state
    pub aggregate: String,
}

impl SqlArtifact {
    pub fn into_pair(self) -> (String, String) {
        (self.transition_function, self.aggregate)
    }
}

/// Generate the SQL state machine with default naming.
///
/// # Example
///
/// ```rust
/// use modal_transducer::builder::TransitionBuilder;
/// use modal_transducer::core::Transducer;
/// use modal_transducer::generate::to_sql;
/// use modal_transducer::symbol_enum;
///
/// symbol_enum! {
///     enum Light {
///         Invalid,
///         Green,
///         Yellow,
///     }
///     invalid: Invalid
/// }
///
/// symbol_enum! {
///     enum Input {
///         Timer,
///     }
/// }
///
/// symbol_enum! {
///     enum Effect {
///         UpdateLightColor,
///     }
/// }
///
/// let light: Transducer<Light, Input, Effect> = Transducer::builder("light")
///     .transition(TransitionBuilder::on(Light::Green, Input::Timer).to(Light::Yellow))
///     .build()
///     .unwrap();
///
/// let sql = to_sql(&light, &Light::Green);
/// assert!(sql.transition_function.contains("light_transition(state text, event text)"));
/// assert!(sql.aggregate.contains("INITCOND = 'Green'"));
/// ```
pub fn to_sql<S, I, E, D>(transducer: &Transducer<S, I, E, D>, initial: &S) -> SqlArtifact
where
    S: State,
    I: Symbol,
    E: Symbol,
    D: ConfigData,
{
    render(transducer, initial, &SqlOptions::default())
}

/// Generate the SQL state machine with explicit naming options.
///
/// The schema and both generated object names must be valid identifiers.
pub fn to_sql_with<S, I, E, D>(
    transducer: &Transducer<S, I, E, D>,
    initial: &S,
    options: &SqlOptions,
) -> Result<SqlArtifact, SqlError>
where
    S: State,
    I: Symbol,
    E: Symbol,
    D: ConfigData,
{
    let name = transducer.name();
    let identifiers = options.schema.iter().cloned().chain([
        format!("{name}{}", options.transition_suffix),
        format!("{name}{}", options.aggregate_suffix),
    ]);
    for identifier in identifiers {
        if !is_sql_identifier(&identifier) {
            return Err(SqlError::InvalidIdentifier { identifier });
        }
    }
    Ok(render(transducer, initial, options))
}

fn render<S, I, E, D>(
    transducer: &Transducer<S, I, E, D>,
    initial: &S,
    options: &SqlOptions,
) -> SqlArtifact
where
    S: State,
    I: Symbol,
    E: Symbol,
    D: ConfigData,
{
    let triples = transducer.triples();
    let prefix = options
        .schema
        .as_ref()
        .map(|schema| format!("{schema}."))
        .unwrap_or_default();
    let function = format!("{prefix}{}{}", transducer.name(), options.transition_suffix);
    let aggregate = format!("{prefix}{}{}", transducer.name(), options.aggregate_suffix);

    debug!(
        transducer = transducer.name(),
        rows = triples.len(),
        function = %function,
        "generating SQL state machine"
    );

    SqlArtifact {
        transition_function: transition_function(&function, &triples),
        aggregate: aggregate_declaration(&aggregate, &function, initial.name()),
    }
}

fn transition_function<S: State, I: Symbol>(
    function: &str,
    triples: &[TransitionTriple<S, I>],
) -> String {
    let mut sql = format!("CREATE OR REPLACE FUNCTION {function}(state text, event text)\n");
    sql.push_str("RETURNS text\nLANGUAGE sql IMMUTABLE\nAS $$\n");
    sql.push_str("SELECT CASE state\n");

    // Triples arrive sorted by (state, input), so each source is one run.
    for group in triples.chunk_by(|a, b| a.state == b.state) {
        sql.push_str(&format!(
            "    WHEN {} THEN CASE event\n",
            literal(group[0].state.name())
        ));
        for triple in group {
            sql.push_str(&format!(
                "        WHEN {} THEN {}\n",
                literal(triple.input.name()),
                literal(triple.next.name())
            ));
        }
        sql.push_str("        ELSE state\n    END\n");
    }

    sql.push_str("    ELSE state\nEND\n$$;\n");
    sql
}

fn aggregate_declaration(aggregate: &str, function: &str, initial: &str) -> String {
    let mut sql = format!("CREATE OR REPLACE AGGREGATE {aggregate}(text) (\n");
    sql.push_str(&format!("    SFUNC = {function},\n"));
    sql.push_str("    STYPE = text,\n");
    sql.push_str(&format!("    INITCOND = {}\n);\n", literal(initial)));
    sql
}

fn literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TransitionBuilder;
    use crate::symbol_enum;

    symbol_enum! {
        enum Light {
            Invalid,
            Green,
            Yellow,
            Red,
        }
        invalid: Invalid
    }

    symbol_enum! {
        enum Input {
            Timer,
            Emergency,
        }
    }

    symbol_enum! {
        enum Effect {
            UpdateLightColor,
        }
    }

    fn light() -> Transducer<Light, Input, Effect> {
        Transducer::builder("light")
            .transitions([
                TransitionBuilder::on(Light::Red, Input::Timer).to(Light::Green),
                TransitionBuilder::on(Light::Green, Input::Emergency).to(Light::Red),
                TransitionBuilder::on(Light::Green, Input::Timer)
                    .to(Light::Yellow)
                    .effect(Effect::UpdateLightColor),
                TransitionBuilder::on(Light::Yellow, Input::Timer).to(Light::Red),
            ])
            .build()
            .unwrap()
    }

    #[test]
    fn transition_function_matches_expected_text() {
        let sql = to_sql(&light(), &Light::Red);
        let expected = "\
CREATE OR REPLACE FUNCTION light_transition(state text, event text)
RETURNS text
LANGUAGE sql IMMUTABLE
AS $$
SELECT CASE state
    WHEN 'Green' THEN CASE event
        WHEN 'Timer' THEN 'Yellow'
        WHEN 'Emergency' THEN 'Red'
        ELSE state
    END
    WHEN 'Yellow' THEN CASE event
        WHEN 'Timer' THEN 'Red'
        ELSE state
    END
    WHEN 'Red' THEN CASE event
        WHEN 'Timer' THEN 'Green'
        ELSE state
    END
    ELSE state
END
$$;
";
        assert_eq!(sql.transition_function, expected);
    }

    #[test]
    fn aggregate_is_seeded_with_initial_state() {
        let sql = to_sql(&light(), &Light::Red);
        let expected = "\
CREATE OR REPLACE AGGREGATE light_fsm(text) (
    SFUNC = light_transition,
    STYPE = text,
    INITCOND = 'Red'
);
";
        assert_eq!(sql.aggregate, expected);
    }

    #[test]
    fn generation_is_byte_stable() {
        let first = to_sql(&light(), &Light::Green);
        let second = to_sql(&light(), &Light::Green);
        assert_eq!(first, second);
    }

    #[test]
    fn options_control_naming() {
        let options = SqlOptions {
            schema: Some("fsm".to_string()),
            transition_suffix: "_step".to_string(),
            aggregate_suffix: "_run".to_string(),
        };
        let (function, aggregate) = to_sql_with(&light(), &Light::Green, &options)
            .unwrap()
            .into_pair();

        assert!(function.starts_with("CREATE OR REPLACE FUNCTION fsm.light_step("));
        assert!(aggregate.contains("AGGREGATE fsm.light_run(text)"));
        assert!(aggregate.contains("SFUNC = fsm.light_step,"));
    }

    #[test]
    fn schema_must_be_an_identifier() {
        let options = SqlOptions {
            schema: Some("fsm; DROP TABLE events".to_string()),
            ..SqlOptions::default()
        };
        assert_eq!(
            to_sql_with(&light(), &Light::Green, &options),
            Err(SqlError::InvalidIdentifier {
                identifier: "fsm; DROP TABLE events".to_string(),
            })
        );
    }

    #[test]
    fn suffixes_must_keep_names_identifiers() {
        let options = SqlOptions {
            aggregate_suffix: "-fsm".to_string(),
            ..SqlOptions::default()
        };
        assert!(matches!(
            to_sql_with(&light(), &Light::Green, &options),
            Err(SqlError::InvalidIdentifier { identifier }) if identifier == "light-fsm"
        ));
    }

    #[test]
    fn identifiers_start_with_letter_or_underscore() {
        assert!(is_sql_identifier("light"));
        assert!(is_sql_identifier("_private2"));
        assert!(!is_sql_identifier("9lives"));
        assert!(!is_sql_identifier(""));
        assert!(!is_sql_identifier("two words"));
    }

    #[test]
    fn literals_escape_quotes() {
        assert_eq!(literal("it's"), "'it''s'");
    }

    #[test]
    fn empty_table_maps_every_state_to_itself() {
        let idle: Transducer<Light, Input, Effect> = Transducer::builder("idle").build().unwrap();
        let sql = to_sql(&idle, &Light::Green);
        assert!(sql
            .transition_function
            .contains("SELECT CASE state\n    ELSE state\nEND\n"));
    }
}
