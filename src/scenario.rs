//! Driver scenarios. Each returns the console trace it produces so the
//! binaries can print it and the tests can assert it line by line.

use std::cell::RefCell;
use std::rc::Rc;

use colored::Colorize;
use itertools::Itertools;

use crate::command::{
    ActionLog, EditAction, Light, LightToggleCommand, RemoteControl, TextBuffer, TextHost,
};
use crate::config::CatalogConfig;
use crate::error::Result;
use crate::iterator::{
    sample_profiles, sample_tree, Directory, SocialNetwork, SocialSpammer, TreeIterator, TreeNode,
};
use crate::observer::{
    DocumentEditor, EmailAlertListener, EventManager, Listener, ListenerResult, LogOpenListener,
    NewsAgency, NewsChannel,
};
use crate::state::Parcel;
use crate::transcript::Transcript;

/// Prints a scenario trace under a highlighted heading.
pub fn print_trace(title: &str, lines: &[String]) {
    println!("{}", format!("=== {title} ===").bold().cyan());
    for line in lines {
        println!("{line}");
    }
    println!();
}

fn describe_host(log: &ActionLog) -> String {
    let host = log.host();
    let host = host.borrow();
    let (start, end) = host.selection_range();
    format!(
        "text='{}' selection=[{start}, {end}] caret={} clipboard={:?} history={}",
        host.text(),
        host.caret_index(),
        host.clipboard(),
        log.history_len()
    )
}

/// Copy, cut, paste and two undos over "hello world", then the remote
/// control toggling a light three times.
pub fn command_editor() -> Vec<String> {
    let trace = Transcript::new();

    let mut buffer = TextBuffer::new("hello world");
    buffer.select(0, 5);
    let mut log = ActionLog::new(buffer.shared());
    trace.record(format!("start: {}", describe_host(&log)));

    for action in [
        EditAction::Copy,
        EditAction::Cut,
        EditAction::Paste,
        EditAction::Undo,
        EditAction::Undo,
    ] {
        let changed = log.perform(action);
        trace.record(format!("{action} (changed={changed}): {}", describe_host(&log)));
    }

    trace.record("Remote control:");
    let light = Rc::new(RefCell::new(Light::new(trace.clone())));
    let mut remote = RemoteControl::new();
    remote.set_command(Box::new(LightToggleCommand::new(light)));
    for _ in 0..3 {
        remote.button_was_pressed();
    }

    trace.take()
}

fn tagged(tag: &'static str, trace: &Transcript) -> Listener<String> {
    let trace = trace.clone();
    Rc::new(move |event: &str, payload: &String| -> ListenerResult {
        trace.record(format!("{tag} received ('{event}', '{payload}')"));
        Ok(())
    })
}

/// Ordered delivery on one channel, isolation between channels, then the
/// document editor and news agency publishers.
pub fn observer_events(config: &CatalogConfig) -> Result<Vec<String>> {
    let trace = Transcript::new();

    let bus = EventManager::new(["open", "save"]);
    bus.subscribe("save", tagged("H1", &trace))?;
    bus.subscribe("save", tagged("H2", &trace))?;

    trace.record("emit save:");
    let delivered = bus.notify("save", &"P".to_string())?;
    trace.record(format!("  delivered to {delivered} listener(s)"));
    trace.record("emit open:");
    let delivered = bus.notify("open", &"Q".to_string())?;
    trace.record(format!("  delivered to {delivered} listener(s)"));

    trace.record("Document editor:");
    let mut editor = DocumentEditor::with_channels(config.channels.iter().cloned());
    editor.subscribe("open", LogOpenListener::new("/path/to/log/file.txt", trace.clone()))?;
    editor.subscribe("save", EmailAlertListener::new("admin@example.com", trace.clone()))?;
    if let Err(err) = editor.save_file() {
        trace.record(format!("save refused: {err}"));
    }
    editor.open_file("test.txt")?;
    editor.save_file()?;

    trace.record("News agency:");
    let mut agency = NewsAgency::new();
    let channel = NewsChannel::new();
    agency.add_observer(channel.clone())?;
    agency.set_news("news")?;
    trace.record(format!(
        "channel has: {}",
        channel.news().unwrap_or_else(|| "<nothing>".to_string())
    ));

    Ok(trace.take())
}

/// Lazy friend traversal with a reset, then the spammer run selected by
/// `config.subject` and `config.contact_kind`.
pub fn iterator_profiles(config: &CatalogConfig) -> Result<Vec<String>> {
    let kind = config.contact_kind()?;
    let trace = Transcript::new();
    let network = SocialNetwork::new("Facebook", sample_profiles(), config.latency())
        .with_transcript(trace.clone());

    let mut friends = network.friends_iter("anna.smith@bing.com");
    trace.record(format!("has_next: {}", friends.has_next()));
    for contact in friends.by_ref() {
        let name = contact.profile.as_ref().map_or("<unknown>", |p| p.name());
        trace.record(format!("next: {} ({name})", contact.email));
    }
    trace.record(format!("has_next: {}", friends.has_next()));

    trace.record("reset");
    friends.reset();
    let again = friends.by_ref().map(|contact| contact.email).join(", ");
    trace.record(format!("second pass: {again}"));
    trace.record(format!(
        "remote calls: {} list, {} profile",
        network.contact_fetches(),
        network.profile_fetches()
    ));

    let spammer = SocialSpammer::new(&network, trace.clone());
    let sent = spammer.send_to(
        &config.subject,
        kind,
        "Hey! This is Anna's friend Josh. Can you do me a favor and like this post [link]?",
    );
    trace.record(format!("messages sent: {sent}"));

    Ok(trace.take())
}

/// In-order, legacy pre-order and level-order walks of the sample tree.
pub fn iterator_tree() -> Vec<String> {
    let tree = sample_tree();
    let mut lines = Vec::new();

    lines.push("DepthFirstIterator:".to_string());
    let mut depth = tree.depth_iter();
    while depth.has_next() {
        if let Ok(value) = depth.get_next() {
            lines.push(format!("get_next(): {value}"));
        }
    }

    #[allow(deprecated)]
    let mut legacy = tree.breadth_iter();
    lines.push(format!("BreadthFirstIterator (legacy, pre-order): {}", legacy.join(", ")));
    lines.push(format!(
        "LevelOrderIterator: {}",
        tree.level_order_iter().join(", ")
    ));

    // On a lopsided tree the two "breadth" orders come apart.
    let lopsided = TreeNode::new(
        1,
        Some(TreeNode::new(2, Some(TreeNode::leaf(4)), None)),
        Some(TreeNode::new(3, None, Some(TreeNode::leaf(5)))),
    );
    lines.push(format!(
        "lopsided pre-order: {}",
        lopsided.pre_order_iter().join(", ")
    ));
    lines.push(format!(
        "lopsided level-order: {}",
        lopsided.level_order_iter().join(", ")
    ));

    lines
}

/// Walks the parcel forward past its terminal phase, then back one step.
pub fn state_package(config: &CatalogConfig) -> Result<Vec<String>> {
    let mut parcel = Parcel::starting_at(config.initial_phase()?);
    let mut lines = vec![format!("describe: {}", parcel.describe())];

    let mut step = |name: &str, parcel: &mut Parcel, forward: bool| {
        let transition = if forward {
            parcel.advance()
        } else {
            parcel.retreat()
        };
        if let Some(advisory) = transition.advisory() {
            lines.push(format!("{name}: {advisory}"));
        } else {
            lines.push(name.to_string());
        }
        lines.push(format!("describe: {}", parcel.describe()));
    };

    for _ in 0..3 {
        step("next", &mut parcel, true);
    }
    step("prev", &mut parcel, false);

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_config() -> CatalogConfig {
        CatalogConfig {
            latency_ms: 0,
            ..CatalogConfig::default()
        }
    }

    #[test]
    fn test_command_editor_trace() {
        let lines = command_editor();
        assert_eq!(
            lines[0],
            "start: text='hello world' selection=[0, 5] caret=11 clipboard=None history=0"
        );
        assert!(lines[1].starts_with("copy (changed=false): text='hello world'"));
        assert!(lines[1].contains("clipboard=Some(\"hello\") history=0"));
        assert!(lines[2].starts_with("cut (changed=true): text=' world'"));
        assert!(lines[2].ends_with("history=1"));
        assert!(lines[3].starts_with("paste (changed=true): text='hello world'"));
        assert!(lines[3].ends_with("history=2"));
        assert!(lines[4].starts_with("undo (changed=true): text=' world'"));
        assert!(lines[4].ends_with("history=1"));
        assert!(lines[5].starts_with("undo (changed=true): text='hello world'"));
        assert!(lines[5].ends_with("history=0"));
        assert_eq!(
            &lines[6..],
            [
                "Remote control:",
                "Light is on! It's so BRIGHT!",
                "Light is off! It's so DARK!",
                "Light is on! It's so BRIGHT!",
            ]
        );
    }

    #[test]
    fn test_observer_trace() {
        let lines = observer_events(&fast_config()).unwrap();
        assert_eq!(
            &lines[..6],
            [
                "emit save:",
                "H1 received ('save', 'P')",
                "H2 received ('save', 'P')",
                "  delivered to 2 listener(s)",
                "emit open:",
                "  delivered to 0 listener(s)",
            ]
        );
        assert_eq!(lines[7], "save refused: Please open a file first.");
        assert!(lines[8].starts_with("Save to log /path/to/log/file.txt: Someone has performed open"));
        assert!(lines[9].starts_with("Email to admin@example.com: Someone has performed save"));
        assert_eq!(lines.last().map(String::as_str), Some("channel has: news"));
    }

    #[test]
    fn test_observer_rejects_config_without_open_channel() {
        let config = CatalogConfig {
            channels: vec!["save".to_string()],
            ..fast_config()
        };
        assert!(observer_events(&config).is_err());
    }

    #[test]
    fn test_iterator_profiles_trace() {
        let lines = iterator_profiles(&fast_config()).unwrap();
        assert_eq!(
            &lines[..9],
            [
                "Facebook: Loading 'friends' list of 'anna.smith@bing.com' over the network...",
                "has_next: true",
                "Facebook: Loading profile 'mad_max@ya.com' over the network...",
                "next: mad_max@ya.com (Maximilian)",
                "Facebook: Loading profile 'catwoman@yahoo.com' over the network...",
                "next: catwoman@yahoo.com (Liza)",
                "has_next: false",
                "reset",
                "second pass: mad_max@ya.com, catwoman@yahoo.com",
            ]
        );
        assert_eq!(lines[9], "remote calls: 1 list, 2 profile");
        assert_eq!(lines.last().map(String::as_str), Some("messages sent: 2"));
    }

    #[test]
    fn test_iterator_profiles_unknown_kind() {
        let config = CatalogConfig {
            contact_kind: "rivals".to_string(),
            ..fast_config()
        };
        let err = iterator_profiles(&config).unwrap_err();
        assert!(err.to_string().contains("'rivals'"));
    }

    #[test]
    fn test_tree_trace() {
        assert_eq!(
            iterator_tree(),
            vec![
                "DepthFirstIterator:",
                "get_next(): 9",
                "get_next(): 3",
                "get_next(): 15",
                "get_next(): 20",
                "get_next(): 7",
                "BreadthFirstIterator (legacy, pre-order): 3, 9, 20, 15, 7",
                "LevelOrderIterator: 3, 9, 20, 15, 7",
                "lopsided pre-order: 1, 2, 4, 3, 5",
                "lopsided level-order: 1, 2, 3, 4, 5",
            ]
        );
    }

    #[test]
    fn test_state_trace() {
        assert_eq!(
            state_package(&fast_config()).unwrap(),
            vec![
                "describe: Package ordered, not yet at office.",
                "next",
                "describe: Package at office, not yet received.",
                "next",
                "describe: Package received by client.",
                "next: This package is already received by a client.",
                "describe: Package received by client.",
                "prev",
                "describe: Package at office, not yet received.",
            ]
        );
    }

    #[test]
    fn test_state_from_configured_phase() {
        let config = CatalogConfig {
            initial_phase: "received".to_string(),
            ..fast_config()
        };
        let lines = state_package(&config).unwrap();
        assert_eq!(lines[0], "describe: Package received by client.");
        assert_eq!(lines[1], "next: This package is already received by a client.");
    }
}
