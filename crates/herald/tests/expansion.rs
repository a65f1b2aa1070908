use std::collections::HashMap;

use herald::{
    Limit, Message, MessageProvider, Provided, Replacement, PREVIEW_LENGTH, REPLACEMENT_LIMIT,
};

/// Message store backed by a YAML mapping of key to string or list, the way
/// language files are usually laid out.
struct YamlMessages(HashMap<String, Vec<String>>);

impl YamlMessages {
    fn parse(source: &str) -> Self {
        let value: serde_yaml::Value = serde_yaml::from_str(source).expect("valid YAML");
        let mut messages = HashMap::new();
        if let serde_yaml::Value::Mapping(mapping) = value {
            for (key, value) in mapping {
                let Some(key) = key.as_str() else { continue };
                let lines = match value {
                    serde_yaml::Value::String(line) => vec![line],
                    serde_yaml::Value::Sequence(lines) => lines
                        .into_iter()
                        .filter_map(|line| line.as_str().map(str::to_string))
                        .collect(),
                    _ => Vec::new(),
                };
                messages.insert(key.to_string(), lines);
            }
        }
        YamlMessages(messages)
    }
}

impl MessageProvider for YamlMessages {
    fn get_lines(&self, key: &str) -> Vec<String> {
        self.0.get(key).cloned().unwrap_or_default()
    }
}

fn no_messages() -> HashMap<String, Vec<String>> {
    HashMap::new()
}

// =========================================================================
// Positional replacements
// =========================================================================

#[test]
fn positional_literal() {
    let lines = Message::from_string("%0% world")
        .replacement("hello")
        .lines(&no_messages());
    assert_eq!(lines, vec!["hello world"]);
}

#[test]
fn positional_indices_follow_argument_order() {
    let lines = Message::from_string("%1% and %0%")
        .replacement("first")
        .replacement("second")
        .lines(&no_messages());
    assert_eq!(lines, vec!["second and first"]);
}

#[test]
fn literal_replacements_are_markup_escaped() {
    let text = Message::from_string("Price %0%")
        .replacement(Replacement::literal("[red] & 100%"))
        .plain(&no_messages());
    assert_eq!(text, "Price [red] & 100%");
}

#[test]
fn escaped_positional_token_is_skipped() {
    let lines = Message::from_string("keep \\%0% replace %0%")
        .replacement("X")
        .lines(&no_messages());
    assert_eq!(lines, vec!["keep \\%0% replace X"]);
}

#[test]
fn sub_message_splices_over_lines() {
    let sub = Message::from_lines(vec!["a".to_string(), "b".to_string()]);
    let lines = Message::from_string("%0% world")
        .replacement(sub)
        .lines(&no_messages());
    assert_eq!(lines, vec!["a", "b", " world"]);
}

#[test]
fn inline_sub_message_stays_on_the_line() {
    let sub = Message::from_lines(vec!["a".to_string(), "b".to_string()]).inline();
    let lines = Message::from_string("%0% world")
        .replacement(sub)
        .lines(&no_messages());
    assert_eq!(lines, vec!["ab world"]);
}

#[test]
fn sub_message_brings_its_own_replacements() {
    let sub = Message::from_string("(%0%)").replacement("inner");
    let lines = Message::from_string("%0%!")
        .replacement(sub)
        .lines(&no_messages());
    assert_eq!(lines, vec!["(inner)", "!"]);
}

#[test]
fn declarations_are_relocated_around_a_splice() {
    let sub = Message::from_lines(vec!["[red]a".to_string(), "b".to_string()]);
    let lines = Message::from_lines(vec![
        "Hello %0%".to_string(),
        "hover: tip".to_string(),
    ])
    .replacement(sub)
    .lines(&no_messages());
    assert_eq!(
        lines,
        vec!["Hello ", "hover: tip", "[red]a", "b", "hover: tip"]
    );
}

// =========================================================================
// Named variables
// =========================================================================

#[test]
fn named_variables_resolve_in_argument_order() {
    let lines = Message::from_string("Hello %player%, welcome to %region%!")
        .replacement(Replacement::named("player", "Alice"))
        .replacement(Replacement::named("region", "spawn"))
        .lines(&no_messages());
    assert_eq!(lines, vec!["Hello Alice, welcome to spawn!"]);
}

#[test]
fn first_answer_wins() {
    let lines = Message::from_string("%who%")
        .replacement(Replacement::named("who", "first"))
        .replacement(Replacement::named("who", "second"))
        .lines(&no_messages());
    assert_eq!(lines, vec!["first"]);
}

#[test]
fn providers_do_not_consume_positional_indices() {
    let lines = Message::from_string("%player% has %0% coins")
        .replacement(Replacement::named("player", "Alice"))
        .replacement("10")
        .lines(&no_messages());
    assert_eq!(lines, vec!["Alice has 10 coins"]);
}

#[test]
fn named_answers_are_escaped() {
    let text = Message::from_string("%style%")
        .replacement(Replacement::named("style", "[bold] text"))
        .plain(&no_messages());
    assert_eq!(text, "[bold] text");
}

#[test]
fn closure_provider_answers_with_a_message() {
    let lines = Message::from_string("%list%")
        .replacement(Replacement::provider(|variable: &str| {
            (variable == "list").then(|| {
                Provided::Message(Message::from_lines(vec![
                    "one".to_string(),
                    "two".to_string(),
                ]))
            })
        }))
        .lines(&no_messages());
    assert_eq!(lines, vec!["one", "two"]);
}

#[test]
fn escaped_named_variable_is_skipped() {
    let lines = Message::from_string("\\%player%")
        .replacement(Replacement::named("player", "Alice"))
        .lines(&no_messages());
    assert_eq!(lines, vec!["\\%player%"]);
}

// =========================================================================
// Key expansion
// =========================================================================

#[test]
fn key_reference_is_replaced() {
    let provider = YamlMessages::parse("greet: \"[green]Hello\"");
    let lines = Message::from_string("%lang:greet%").lines(&provider);
    assert_eq!(lines, vec!["[green]Hello"]);
}

#[test]
fn key_reference_with_arguments() {
    let provider = YamlMessages::parse("greet: \"Hi %0%, you have %1% coins!\"");
    let lines = Message::from_string("%lang:greet|Alice|10|%").lines(&provider);
    assert_eq!(lines, vec!["Hi Alice, you have 10 coins!"]);
}

#[test]
fn key_arguments_stay_inline() {
    // The argument itself would be a multi-line message if it were not
    // wrapped inline by the key pass.
    let provider = YamlMessages::parse("wrap: \"<%0%>\"");
    let lines = Message::from_string("%lang:wrap|middle|%").lines(&provider);
    assert_eq!(lines, vec!["<middle>"]);
}

#[test]
fn keys_resolve_recursively() {
    let provider = YamlMessages::parse(concat!(
        "outer: \"start %lang:inner% end\"\n",
        "inner: \"middle\"\n",
    ));
    let lines = Message::from_key(&provider, "outer").lines(&provider);
    assert_eq!(lines, vec!["start ", "middle", " end"]);
}

#[test]
fn multi_line_key_splices_with_declarations() {
    let provider = YamlMessages::parse(concat!(
        "detail:\n",
        "  - \"[blue]line one\"\n",
        "  - \"line two\"\n",
    ));
    let lines = Message::from_lines(vec![
        "before %lang:detail% after".to_string(),
        "command: /info".to_string(),
    ])
    .lines(&provider);
    assert_eq!(
        lines,
        vec![
            "before ",
            "command: /info",
            "[blue]line one",
            "line two",
            "command: /info",
            " after",
            "command: /info",
        ]
    );
}

#[test]
fn unknown_key_expands_to_nothing() {
    let lines = Message::from_string("%lang:missing%").lines(&no_messages());
    assert!(lines.is_empty());
}

#[test]
fn key_expansion_can_be_disabled() {
    let provider = YamlMessages::parse("greet: \"hello\"");
    let lines = Message::from_string("%lang:greet%")
        .no_key_expansion()
        .lines(&provider);
    assert_eq!(lines, vec!["%lang:greet%"]);
}

#[test]
fn escaped_key_reference_is_skipped() {
    let provider = YamlMessages::parse("greet: \"hello\"");
    let lines = Message::from_string("\\%lang:greet%").lines(&provider);
    assert_eq!(lines, vec!["\\%lang:greet%"]);
}

#[test]
fn prefix_line_resolves_through_the_store() {
    let provider = YamlMessages::parse("prefix: \"[gray]> \"");
    let lines = Message::from_string("hi").prefix().lines(&provider);
    assert_eq!(lines, vec!["[gray]> ", "hi"]);
}

// =========================================================================
// Bounded expansion
// =========================================================================

#[test]
fn self_reference_terminates_with_one_diagnostic() {
    let provider = YamlMessages::parse("self: \"%lang:self%\"");
    let mut message = Message::from_key(&provider, "self");
    let mut limit = Limit::new(
        REPLACEMENT_LIMIT,
        message.key().map(str::to_string),
        message.preview(PREVIEW_LENGTH),
    );

    let result = message.resolve_with(&provider, &mut limit);

    assert!(result.is_err());
    assert!(limit.reached());
    assert!(limit.notified());
    assert_eq!(
        result.expect_err("limit must trip").key.as_deref(),
        Some("self")
    );
}

#[test]
fn mutual_reference_terminates() {
    let provider = YamlMessages::parse(concat!(
        "ping: \"%lang:pong%\"\n",
        "pong: \"%lang:ping%\"\n",
    ));
    // The absorbing entry point returns the best-effort partial result.
    let _ = Message::from_key(&provider, "ping").lines(&provider);
}

#[test]
fn self_feeding_inline_replacement_terminates() {
    // Each substitution re-introduces its own token; only the budget stops
    // the rewrite.
    let sub = Message::from_string("%0% again").inline();
    let _ = Message::from_string("%0%")
        .replacement(sub)
        .lines(&no_messages());
}

#[test]
fn fresh_limits_are_independent() {
    let provider = YamlMessages::parse("self: \"%lang:self%\"");

    let mut first = Message::from_key(&provider, "self");
    let mut first_limit = Limit::new(REPLACEMENT_LIMIT, None, String::new());
    assert!(first.resolve_with(&provider, &mut first_limit).is_err());

    // A previous exhaustion does not leak into a new expansion.
    let mut second = Message::from_string("fine");
    let mut second_limit = Limit::new(REPLACEMENT_LIMIT, None, String::new());
    assert!(second.resolve_with(&provider, &mut second_limit).is_ok());
    assert!(!second_limit.notified());
}

// =========================================================================
// End to end
// =========================================================================

#[test]
fn key_message_renders_to_wire_json() {
    let provider = YamlMessages::parse(concat!(
        "buy:\n",
        "  - \"[gold]Buy %0% now!\"\n",
        "  - \"hover: [green]Only %1% coins\"\n",
        "  - \"command: /buy %0%\"\n",
    ));

    let values = Message::from_key(&provider, "buy")
        .replacement("sword")
        .replacement("10")
        .wire(&provider);
    assert_eq!(values.len(), 1);

    let value: serde_json::Value = serde_json::from_str(&values[0]).expect("valid JSON");
    assert_eq!(value["text"], "Buy sword now!");
    assert_eq!(value["color"], "gold");
    assert_eq!(value["clickEvent"]["action"], "run_command");
    assert_eq!(value["clickEvent"]["value"], "/buy sword");
    assert_eq!(value["hoverEvent"]["value"]["text"], "Only 10 coins");
    assert_eq!(value["hoverEvent"]["value"]["color"], "green");
}

#[test]
fn key_message_renders_to_plain_text() {
    let provider = YamlMessages::parse("sale: \"[gold]%0% is for sale![break]\"");
    let text = Message::from_key(&provider, "sale")
        .replacement("spawn")
        .plain(&provider);
    assert_eq!(text, "§6spawn is for sale!\n");
}
