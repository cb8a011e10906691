use std::{path::PathBuf, sync::Arc};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    compose_bills_view, load_settings, render_bills_view, render_receipt_modal,
    session::JWT_KEY, BillsController, BillsView, ClientSettings, FileKeyValueStore, HttpStore,
    IconEye, KeyValueStore, NavigationTarget, NewBillController, NewBillForm, Router,
    SessionAccessor, Store, UploadedFile,
};
use shared::{
    domain::{ExpenseType, UserType},
    protocol::Session,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "billed", about = "Employee expense bills client")]
struct Args {
    /// Overrides the configured bills API base URL.
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Stores (or clears) the signed-in user used to stamp new bills.
    Session {
        #[arg(long)]
        email: Option<String>,
        #[arg(long, default_value = "employee")]
        user_type: UserType,
        #[arg(long)]
        jwt: Option<String>,
        #[arg(long)]
        clear: bool,
    },
    /// Lists the bills, newest first.
    Bills,
    /// Uploads a receipt and creates a bill from it.
    New {
        #[arg(long)]
        file: PathBuf,
        #[arg(long, default_value = "Transports")]
        expense_type: ExpenseType,
        #[arg(long)]
        name: String,
        #[arg(long)]
        date: String,
        #[arg(long)]
        amount: String,
        #[arg(long, default_value = "")]
        vat: String,
        #[arg(long, default_value = "")]
        pct: String,
        #[arg(long, default_value = "")]
        commentary: String,
    },
    /// Opens the receipt preview of a bill.
    Receipt { bill_id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(api_url) = args.api_url {
        settings.api_url = api_url;
    }
    let kv: Arc<dyn KeyValueStore> = Arc::new(FileKeyValueStore::new(&settings.session_file));
    let session = SessionAccessor::new(Arc::clone(&kv));

    match args.command {
        Command::Session {
            email,
            user_type,
            jwt,
            clear,
        } => {
            if clear {
                session.clear().context("failed to clear session")?;
                println!("Session cleared");
                return Ok(());
            }
            let email = email.ok_or_else(|| anyhow!("--email is required unless --clear"))?;
            session
                .store_user(&Session { user_type, email })
                .context("failed to store session")?;
            if let Some(jwt) = jwt {
                kv.set_item(JWT_KEY, &jwt).context("failed to store token")?;
            }
            println!("Session saved to {}", settings.session_file.display());
        }
        Command::Bills => {
            let store = build_store(&settings, &session)?;
            let router = Arc::new(Router::new(NavigationTarget::Bills));
            print_bills_page(&settings, store, router).await?;
        }
        Command::New {
            file,
            expense_type,
            name,
            date,
            amount,
            vat,
            pct,
            commentary,
        } => {
            let store = build_store(&settings, &session)?;
            let router = Arc::new(Router::new(NavigationTarget::Bills));
            BillsController::new(Arc::clone(&store), router.clone()).handle_click_new_bill();

            let content = tokio::fs::read(&file)
                .await
                .with_context(|| format!("failed to read receipt '{}'", file.display()))?;
            let file_name = file
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("receipt")
                .to_string();
            let mime_type = mime_guess::from_path(&file)
                .first_raw()
                .map(str::to_string);

            let mut new_bill = NewBillController::new(Arc::clone(&store), router.clone(), session)
                .with_numeric_parsing(settings.numeric_parsing);
            new_bill
                .handle_change_file(UploadedFile::new(file_name, mime_type, content))
                .await
                .with_context(|| format!("receipt '{}' was not accepted", file.display()))?;

            let form = NewBillForm::new()
                .with_expense_type(expense_type)
                .with_name(name)
                .with_date(date)
                .with_amount(amount)
                .with_vat(vat)
                .with_pct(pct)
                .with_commentary(commentary);
            let bill = new_bill
                .handle_submit(&form)
                .await
                .context("failed to create bill")?;
            info!(bill_id = %bill.id, "bill created");

            if router.current() == NavigationTarget::Bills {
                print_bills_page(&settings, store, router).await?;
            }
        }
        Command::Receipt { bill_id } => {
            let store = build_store(&settings, &session)?;
            let mut bills = BillsController::new(store, Arc::new(Router::new(NavigationTarget::Bills)))
                .with_preview_width(settings.preview_width);
            let rows = bills.get_bills().await.context("failed to list bills")?;
            let Some(row) = rows.iter().find(|row| row.bill.id.0 == bill_id) else {
                bail!("no bill with id '{bill_id}'");
            };
            let icon = IconEye::for_bill(&row.bill);
            print!("{}", render_receipt_modal(bills.handle_click_icon_eye(&icon)));
        }
    }

    Ok(())
}

fn build_store(settings: &ClientSettings, session: &SessionAccessor) -> Result<Arc<dyn Store>> {
    let jwt = session.jwt().context("failed to read session token")?;
    let store = HttpStore::new(&settings.api_url, jwt)
        .with_context(|| format!("invalid api url '{}'", settings.api_url))?;
    Ok(Arc::new(store))
}

async fn print_bills_page(
    settings: &ClientSettings,
    store: Arc<dyn Store>,
    router: Arc<Router>,
) -> Result<()> {
    let controller = BillsController::new(store, router).with_preview_width(settings.preview_width);
    let view = compose_bills_view(&controller).await;
    print!("{}", render_bills_view(&view));
    if let BillsView::Error(message) = view {
        bail!("failed to list bills: {message}");
    }
    Ok(())
}
