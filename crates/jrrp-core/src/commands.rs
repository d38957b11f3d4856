//! Command text -> action.

const ROOT_ALIAS: &str = "今日人品";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    ShowLuck,
    Submit(String),
    Retract,
    Help,
}

/// Parse `/jrrp[@bot] [sub-command] [args]` (or the `今日人品` alias).
///
/// Returns `None` when the text is not addressed to this plugin. For `submit`,
/// everything after the sub-command word is kept verbatim, newlines included.
pub fn parse_command(text: &str, command: &str) -> Option<Action> {
    let text = text.trim_start();
    let (head, rest) = split_word(text);

    if !is_root(head, command) {
        return None;
    }

    let (sub, args) = split_word(rest.trim_start());
    let action = match sub.to_lowercase().as_str() {
        "" => Action::ShowLuck,
        "submit" | "投稿" => Action::Submit(args.to_string()),
        "retract" | "撤回投稿" => Action::Retract,
        "help" | "帮助" => Action::Help,
        _ => Action::Help,
    };
    Some(action)
}

fn is_root(head: &str, command: &str) -> bool {
    if head == ROOT_ALIAS {
        return true;
    }
    let Some(slash) = head.strip_prefix('/') else {
        return false;
    };
    // Telegram may send `/cmd@botname`.
    let name = slash.split('@').next().unwrap_or("");
    name.eq_ignore_ascii_case(command)
}

fn split_word(s: &str) -> (&str, &str) {
    match s.find(char::is_whitespace) {
        Some(idx) => (&s[..idx], &s[idx..]),
        None => (s, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_command_shows_luck() {
        assert_eq!(parse_command("/jrrp", "jrrp"), Some(Action::ShowLuck));
        assert_eq!(parse_command("/JRRP@my_bot  ", "jrrp"), Some(Action::ShowLuck));
        assert_eq!(parse_command("今日人品", "jrrp"), Some(Action::ShowLuck));
    }

    #[test]
    fn sub_commands_and_aliases() {
        assert_eq!(parse_command("/jrrp retract", "jrrp"), Some(Action::Retract));
        assert_eq!(parse_command("今日人品 撤回投稿", "jrrp"), Some(Action::Retract));
        assert_eq!(parse_command("/jrrp help", "jrrp"), Some(Action::Help));
        assert_eq!(parse_command("今日人品 帮助", "jrrp"), Some(Action::Help));
        assert_eq!(parse_command("/jrrp whatever", "jrrp"), Some(Action::Help));
    }

    #[test]
    fn submit_keeps_the_multiline_body() {
        let text = "/jrrp submit\n!text\nhello\n!source\nme";
        assert_eq!(
            parse_command(text, "jrrp"),
            Some(Action::Submit("\n!text\nhello\n!source\nme".to_string()))
        );
        assert_eq!(
            parse_command("今日人品 投稿", "jrrp"),
            Some(Action::Submit(String::new()))
        );
    }

    #[test]
    fn sub_command_may_follow_a_newline() {
        assert_eq!(parse_command("/jrrp\nhelp", "jrrp"), Some(Action::Help));
    }

    #[test]
    fn other_text_is_ignored() {
        assert_eq!(parse_command("hello", "jrrp"), None);
        assert_eq!(parse_command("/start", "jrrp"), None);
        assert_eq!(parse_command("/jrrpx", "jrrp"), None);
        assert_eq!(parse_command("", "jrrp"), None);
    }

    #[test]
    fn custom_command_name() {
        assert_eq!(parse_command("/luck", "luck"), Some(Action::ShowLuck));
        assert_eq!(parse_command("/jrrp", "luck"), None);
    }
}
