//! Command execution.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every command builds one `ApiClient` over the state directory, runs the
//! matching shop operation, and prints the result as pretty JSON. Commands
//! that need the signed-in user bootstrap a `SessionStore` first, exactly as
//! the browser does on page load.

use serde_json::{Value, json};
use shop::admin::{self, FormMode, ItemForm, UserForm};
use shop::cart::parse_quantity;
use shop::checkout::{checkout, checkout_error_message};
use shop::money::format_money;
use shop::profile::{self, ProfileForm};
use shop::types::{Registration, Role};
use shop::{ApiClient, Cart, FileStore, SessionStore};

use crate::notifier::StderrNotifier;
use crate::transport::ReqwestTransport;
use crate::{
    CartSubcommand, Cli, CliError, Command, ItemsSubcommand, OrdersSubcommand, ProfileSubcommand,
    ProfileUpdateArgs, RegisterArgs, UserFields, UsersSubcommand,
};

type CliClient = ApiClient<ReqwestTransport, FileStore>;

struct Context {
    client: CliClient,
    notifier: StderrNotifier,
}

impl Context {
    /// A session store with the persisted token resolved.
    async fn session(&self) -> Result<SessionStore<ReqwestTransport, FileStore>, CliError> {
        let session = SessionStore::open(self.client.clone()).await;
        if session.state().is_authenticated() {
            Ok(session)
        } else {
            Err(CliError::NotSignedIn)
        }
    }

    fn cart(&self) -> Cart<FileStore> {
        Cart::load(self.client.store().clone())
    }
}

pub(crate) async fn run(cli: Cli) -> Result<(), CliError> {
    let transport = ReqwestTransport::new(reqwest::Client::builder().build()?);
    let store = FileStore::new(&cli.state_dir);
    let ctx = Context {
        client: ApiClient::new(shop::config::api_base_url_or_default(Some(&cli.api_base_url)), transport, store),
        notifier: StderrNotifier { assume_yes: cli.yes },
    };
    tracing::debug!(base_url = ctx.client.base_url(), state_dir = %cli.state_dir.display(), "starting");

    match cli.command {
        Command::Login { email, password } => {
            let mut session = SessionStore::new(ctx.client.clone());
            let user = session.login(&email, &password).await?;
            print_json(&serde_json::to_value(user)?)
        }
        Command::Register(args) => run_register(&ctx, args).await,
        Command::Logout => {
            let mut session = SessionStore::new(ctx.client.clone());
            session.sign_out().await;
            print_json(&json!({ "signed_out": true }))
        }
        Command::Whoami => {
            let session = ctx.session().await?;
            print_json(&serde_json::to_value(session.user())?)
        }
        Command::Items(items) => run_items(&ctx, items.command).await,
        Command::Cart(cart) => run_cart(&ctx, cart.command).await,
        Command::Checkout => {
            let mut cart = ctx.cart();
            match checkout(&ctx.client, &mut cart, &ctx.notifier).await {
                Ok(order) => print_json(&json!({ "placed": true, "order": order })),
                Err(err) => Err(CliError::Invalid(checkout_error_message(&err))),
            }
        }
        Command::Orders(orders) => match orders.command {
            OrdersSubcommand::List => print_json(&serde_json::to_value(ctx.client.list_orders().await?)?),
            OrdersSubcommand::Show { id } => print_json(&serde_json::to_value(ctx.client.get_order(id).await?)?),
        },
        Command::Profile(profile) => run_profile(&ctx, profile.command).await,
        Command::Users(users) => run_users(&ctx, users.command).await,
    }
}

async fn run_register(ctx: &Context, args: RegisterArgs) -> Result<(), CliError> {
    let registration = Registration {
        email: args.email.trim().to_owned(),
        password: args.password,
        password_confirmation: args.password_confirmation,
        first_name: args.first_name.trim().to_owned(),
        last_name: args.last_name.trim().to_owned(),
    };
    let mut session = SessionStore::new(ctx.client.clone());
    let user = session.register(&registration).await?;
    print_json(&serde_json::to_value(user)?)
}

async fn run_items(ctx: &Context, command: ItemsSubcommand) -> Result<(), CliError> {
    match command {
        ItemsSubcommand::List { q } => print_json(&serde_json::to_value(ctx.client.list_items(&q).await?)?),
        ItemsSubcommand::Show { id } => print_json(&serde_json::to_value(ctx.client.get_item(id).await?)?),
        ItemsSubcommand::Create { name, description, price } => {
            let form = ItemForm { name, description, price };
            admin::save_item(&ctx.client, FormMode::Create, &form, &ctx.notifier).await?;
            Ok(())
        }
        ItemsSubcommand::Update { id, name, description, price } => {
            let mut form = ItemForm::from_item(&ctx.client.get_item(id).await?);
            overlay(&mut form.name, name);
            overlay(&mut form.description, description);
            overlay(&mut form.price, price);
            admin::save_item(&ctx.client, FormMode::Edit(id), &form, &ctx.notifier).await?;
            Ok(())
        }
        ItemsSubcommand::Delete { id } => {
            let item = ctx.client.get_item(id).await?;
            let outcome = admin::delete_item(&ctx.client, &item, &ctx.notifier).await?;
            print_json(&json!({ "outcome": format!("{outcome:?}").to_lowercase() }))
        }
    }
}

async fn run_cart(ctx: &Context, command: CartSubcommand) -> Result<(), CliError> {
    let mut cart = ctx.cart();
    match command {
        CartSubcommand::Show => {}
        CartSubcommand::Add { id, qty } => {
            let item = ctx.client.get_item(id).await?;
            cart.add(&item, qty);
        }
        CartSubcommand::Set { id, qty } => cart.set_quantity(id, parse_quantity(&qty)),
        CartSubcommand::Inc { id } => cart.increment(id),
        CartSubcommand::Dec { id } => cart.decrement(id),
        CartSubcommand::Remove { id } => cart.remove(id),
        CartSubcommand::Clear => cart.clear(),
    }
    print_json(&cart_summary(&cart)?)
}

async fn run_profile(ctx: &Context, command: ProfileSubcommand) -> Result<(), CliError> {
    let mut session = ctx.session().await?;
    match command {
        ProfileSubcommand::Show => print_json(&serde_json::to_value(session.user())?),
        ProfileSubcommand::Update(args) => {
            let Some(current) = session.user() else {
                return Err(CliError::NotSignedIn);
            };
            let mut form = ProfileForm::from_user(current);
            apply_profile_args(&mut form, args);
            let updated = profile::save_profile(&mut session, &mut form, &ctx.notifier).await?;
            match updated {
                Some(user) => print_json(&serde_json::to_value(user)?),
                None => Ok(()),
            }
        }
        ProfileSubcommand::Delete { confirm_email } => {
            profile::delete_account(&mut session, &confirm_email, &ctx.notifier).await?;
            Ok(())
        }
    }
}

async fn run_users(ctx: &Context, command: UsersSubcommand) -> Result<(), CliError> {
    match command {
        UsersSubcommand::List { q } => {
            let users = ctx.client.list_users().await?;
            print_json(&serde_json::to_value(admin::filter_users(&users, &q))?)
        }
        UsersSubcommand::Show { id } => print_json(&serde_json::to_value(ctx.client.get_user(id).await?)?),
        UsersSubcommand::Create(fields) => {
            if fields.email.as_deref().is_none_or(|email| email.trim().is_empty()) {
                return Err(CliError::Invalid("--email is required".to_owned()));
            }
            let mut form = UserForm::default();
            apply_user_fields(&mut form, fields);
            admin::save_user(&ctx.client, FormMode::Create, &form, &ctx.notifier).await?;
            Ok(())
        }
        UsersSubcommand::Update { id, fields } => {
            let mut form = UserForm::from_user(&ctx.client.get_user(id).await?);
            apply_user_fields(&mut form, fields);
            admin::save_user(&ctx.client, FormMode::Edit(id), &form, &ctx.notifier).await?;
            Ok(())
        }
        UsersSubcommand::Delete { id } => {
            let session = ctx.session().await?;
            let current_user_id = session.user().map(|user| user.id);
            let target = ctx.client.get_user(id).await?;
            let outcome = admin::delete_user(&ctx.client, &target, current_user_id, &ctx.notifier).await?;
            print_json(&json!({ "outcome": format!("{outcome:?}").to_lowercase() }))
        }
    }
}

fn overlay(field: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *field = value;
    }
}

pub(crate) fn apply_profile_args(form: &mut ProfileForm, args: ProfileUpdateArgs) {
    overlay(&mut form.first_name, args.first_name);
    overlay(&mut form.last_name, args.last_name);
    overlay(&mut form.email, args.email);
    overlay(&mut form.password, args.password);
    overlay(&mut form.password_confirmation, args.password_confirmation);
}

pub(crate) fn apply_user_fields(form: &mut UserForm, fields: UserFields) {
    overlay(&mut form.email, fields.email);
    overlay(&mut form.first_name, fields.first_name);
    overlay(&mut form.last_name, fields.last_name);
    overlay(&mut form.password, fields.password);
    overlay(&mut form.password_confirmation, fields.password_confirmation);
    if let Some(role) = fields.role {
        form.role = Role::from(role.trim().to_owned());
    }
}

pub(crate) fn cart_summary(cart: &Cart<FileStore>) -> Result<Value, CliError> {
    Ok(json!({
        "lines": serde_json::to_value(cart.lines())?,
        "item_count": cart.item_count(),
        "total": format_money(cart.total()),
    }))
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
