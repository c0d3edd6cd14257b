//! Help topics.

use std::io::{self, Write};

/// One-line usage for each documented command.
pub const TOPICS: &[(&str, &str)] = &[
    ("EOF", "Exit the console (Ctrl-D)."),
    ("all", "all [<Type>] | <Type>.all(): print every instance, or every instance of one type."),
    ("count", "count <Type> | <Type>.count(): print the number of instances of a type."),
    ("create", "create <Type>: create an instance, save it, and print its id."),
    ("destroy", "destroy <Type> <id> | <Type>.destroy(\"<id>\"): delete an instance and save."),
    ("help", "help [<command>]: list commands, or describe one."),
    ("quit", "Quit command to exit the program."),
    ("show", "show <Type> <id> | <Type>.show(\"<id>\"): print an instance."),
    (
        "update",
        "update <Type> <id> <name> \"<value>\" | <Type>.update(\"<id>\", \"<name>\", \"<value>\") | \
         <Type>.update(\"<id>\", {\"<name>\": \"<value>\", ...}): set attributes and save.",
    ),
];

/// Write the command list, or the usage line for `topic`.
pub fn write_help(out: &mut impl Write, topic: Option<&str>) -> io::Result<()> {
    match topic {
        None => {
            let header = "Documented commands (type help <topic>):";
            writeln!(out)?;
            writeln!(out, "{header}")?;
            writeln!(out, "{}", "=".repeat(header.len()))?;
            let names: Vec<&str> = TOPICS.iter().map(|(name, _)| *name).collect();
            writeln!(out, "{}", names.join("  "))?;
            writeln!(out)
        }
        Some(topic) => match TOPICS.iter().find(|(name, _)| *name == topic) {
            Some((_, usage)) => writeln!(out, "{usage}"),
            None => writeln!(out, "*** No help on {topic}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(topic: Option<&str>) -> String {
        let mut out = Vec::new();
        write_help(&mut out, topic).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn lists_every_command() {
        let text = render(None);
        for (name, _) in TOPICS {
            assert!(text.contains(name), "missing {name}");
        }
    }

    #[test]
    fn describes_one_command() {
        assert_eq!(render(Some("quit")), "Quit command to exit the program.\n");
    }

    #[test]
    fn unknown_topic() {
        assert_eq!(render(Some("fly")), "*** No help on fly\n");
    }
}
