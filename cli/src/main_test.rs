use clap::Parser;
use shop::admin::UserForm;
use shop::profile::ProfileForm;
use shop::types::Role;

use super::*;
use crate::commands::{apply_profile_args, apply_user_fields};

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("shopctl").chain(args.iter().copied())).unwrap()
}

// =============================================================
// Argument parsing
// =============================================================

#[test]
fn global_flags_have_defaults() {
    let cli = parse(&["--api-base-url", "http://api.test", "logout"]);
    assert_eq!(cli.api_base_url, "http://api.test");
    assert!(!cli.yes);
    assert!(matches!(cli.command, Command::Logout));
}

#[test]
fn yes_flag_is_accepted_after_subcommand() {
    let cli = parse(&["users", "delete", "4", "--yes"]);
    assert!(cli.yes);
    assert!(matches!(cli.command, Command::Users(UsersCommand { command: UsersSubcommand::Delete { id: 4 } })));
}

#[test]
fn login_requires_email_and_password() {
    assert!(Cli::try_parse_from(["shopctl", "login", "--email", "a@b.co"]).is_err());
    let cli = parse(&["login", "--email", "a@b.co", "--password", "secret"]);
    assert!(matches!(cli.command, Command::Login { ref email, .. } if email == "a@b.co"));
}

#[test]
fn cart_add_defaults_quantity_to_one() {
    let cli = parse(&["cart", "add", "7"]);
    assert!(matches!(cli.command, Command::Cart(CartCommand { command: CartSubcommand::Add { id: 7, qty: 1 } })));
}

#[test]
fn cart_set_keeps_raw_quantity_text() {
    let cli = parse(&["cart", "set", "7", "abc"]);
    assert!(matches!(
        cli.command,
        Command::Cart(CartCommand { command: CartSubcommand::Set { id: 7, ref qty } }) if qty == "abc"
    ));
}

#[test]
fn items_list_query_defaults_blank() {
    let cli = parse(&["items", "list"]);
    assert!(matches!(cli.command, Command::Items(ItemsCommand { command: ItemsSubcommand::List { ref q } }) if q.is_empty()));
}

// =============================================================
// Form overlays
// =============================================================

#[test]
fn apply_user_fields_keeps_unset_values() {
    let mut form = UserForm {
        first_name: "Ada".to_owned(),
        email: "ada@example.com".to_owned(),
        role: Role::User,
        ..UserForm::default()
    };
    apply_user_fields(
        &mut form,
        UserFields { role: Some(" admin ".to_owned()), last_name: Some("Lovelace".to_owned()), ..UserFields::default() },
    );
    assert_eq!(form.first_name, "Ada");
    assert_eq!(form.last_name, "Lovelace");
    assert_eq!(form.email, "ada@example.com");
    assert_eq!(form.role, Role::Admin);
}

#[test]
fn apply_profile_args_overrides_given_fields() {
    let mut form = ProfileForm { first_name: "Ada".to_owned(), email: "ada@example.com".to_owned(), ..ProfileForm::default() };
    apply_profile_args(
        &mut form,
        ProfileUpdateArgs { email: Some("new@example.com".to_owned()), ..ProfileUpdateArgs::default() },
    );
    assert_eq!(form.first_name, "Ada");
    assert_eq!(form.email, "new@example.com");
    assert!(form.password.is_empty());
}
