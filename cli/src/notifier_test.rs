use super::*;

#[test]
fn is_yes_accepts_y_and_yes() {
    assert!(is_yes("y\n"));
    assert!(is_yes(" YES "));
}

#[test]
fn is_yes_declines_everything_else() {
    assert!(!is_yes(""));
    assert!(!is_yes("n"));
    assert!(!is_yes("yep"));
}

#[test]
fn notice_line_tags_kind() {
    assert_eq!(notice_line("Item deleted", NoticeKind::Success), "[success] Item deleted");
    assert_eq!(notice_line("You can't delete yourself", NoticeKind::Warning), "[warning] You can't delete yourself");
}

#[test]
fn assume_yes_confirms_without_prompting() {
    let notifier = StderrNotifier { assume_yes: true };
    assert!(notifier.confirm("Delete user ada@example.com?"));
}
