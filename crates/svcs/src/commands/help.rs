//! Command summary.

/// Commands and their one-line descriptions, in display order.
pub const COMMANDS: &[(&str, &str)] = &[
    ("config", "Get and set a username."),
    ("add", "Add a file to the index."),
    ("log", "Show commit logs."),
    ("commit", "Save changes."),
    ("checkout", "Restore a file."),
];

/// Render the command summary.
pub fn help_text() -> String {
    let mut text = String::from("These are SVCS commands:");
    for (command, description) in COMMANDS {
        text.push('\n');
        text.push_str(&format!("{command:<11}{description}"));
    }
    text
}

pub fn print_help() {
    println!("{}", help_text());
}

/// Response to a command clap did not recognise.
pub fn unknown_text(command: &str) -> String {
    if command == "help" {
        help_text()
    } else {
        format!("'{command}' is not a SVCS command.")
    }
}

pub fn print_unknown(command: &str) {
    println!("{}", unknown_text(command));
}
