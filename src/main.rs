//! # storefront
//!
//! Command-line front end for the catalog service. Each invocation starts a session,
//! performs one action through it the way the storefront screens would, prints the
//! resulting state and shuts the session down.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use storefront::config::{ClientConfig, PAGE_SIZE_OPTIONS};
use storefront::controller::{
    Field, FormError, StorefrontError, StorefrontSnapshot, ViewState,
};
use storefront::lifecycle::{setup_tracing, StorefrontSystem};
use storefront::model::{Page, Product, ProductId};
use storefront::session::{SessionClient, SessionError};
use tracing::{info, Instrument};

#[derive(Parser)]
#[command(name = "storefront")]
#[command(about = "Browse and edit the product catalog", long_about = None)]
struct Cli {
    /// TOML file with `base_url`, `page_size` and `request_timeout_secs`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Catalog service root, e.g. http://localhost:9090.
    #[arg(long, env = "STOREFRONT_API_URL")]
    base_url: Option<String>,

    /// Products per page.
    #[arg(long)]
    size: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show one page of products.
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show a product's details.
    Show {
        id: ProductId,
        /// Which image to mark as selected.
        #[arg(long, default_value_t = 0)]
        image: usize,
    },
    /// List the sellers a new product can be assigned to.
    Sellers,
    /// Create a product.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        price: String,
        #[arg(long)]
        seller: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long = "image")]
        images: Vec<String>,
    },
    /// Change an existing product.
    Edit {
        id: ProductId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        price: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Images to append.
        #[arg(long = "image")]
        images: Vec<String>,
        /// Drop all current images before appending.
        #[arg(long)]
        clear_images: bool,
    },
    /// Delete a product.
    Delete { id: ProductId },
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    let system = StorefrontSystem::new(&config).map_err(|e| e.to_string())?;

    let span = tracing::info_span!("command");
    let result = run(&system.session, cli.command, config.page_size)
        .instrument(span)
        .await;

    system.shutdown().await?;
    result.map_err(describe)
}

fn load_config(cli: &Cli) -> Result<ClientConfig, String> {
    let config = match &cli.config {
        Some(path) => ClientConfig::from_file(path).map_err(|e| e.to_string())?,
        None => ClientConfig::default(),
    }
    .with_env_overrides()
    .and_then(|config| config.with_flags(cli.base_url.clone(), cli.size))
    .map_err(|e| e.to_string())?;

    if !PAGE_SIZE_OPTIONS.contains(&config.page_size) {
        info!(size = config.page_size, options = ?PAGE_SIZE_OPTIONS, "Using a page size outside the offered options");
    }
    Ok(config)
}

async fn run(session: &SessionClient, command: Command, page_size: u32) -> Result<(), SessionError> {
    match command {
        Command::List { page } => {
            let loaded = session.load(page, page_size).await;
            render(&session.snapshot().await?);
            loaded?;
        }
        Command::Show { id, image } => {
            session.open_product(id).await?;
            if image > 0 {
                session.select_image(image).await?;
            }
            render(&session.snapshot().await?);
        }
        Command::Sellers => {
            session.start_add().await?;
            let snapshot = session.snapshot().await?;
            if let Some(form) = snapshot.form {
                match form.sellers_error {
                    Some(message) => println!("{message}"),
                    None => {
                        for seller in &form.sellers {
                            println!("{:>4}  {}", seller.id, seller.name);
                        }
                    }
                }
            }
            session.back().await?;
        }
        Command::Add {
            title,
            price,
            seller,
            description,
            images,
        } => {
            session.load(1, page_size).await?;
            session.start_add().await?;
            session.set_field(Field::Title, title).await?;
            session.set_field(Field::Price, price).await?;
            session.set_field(Field::Seller, seller).await?;
            if let Some(description) = description {
                session.set_field(Field::Description, description).await?;
            }
            add_images(session, images).await?;
            let product = session.submit().await?;
            println!("Created product {}", product.id);
            render(&session.snapshot().await?);
        }
        Command::Edit {
            id,
            title,
            price,
            description,
            images,
            clear_images,
        } => {
            session.fetch_and_edit(id).await?;
            if let Some(title) = title {
                session.set_field(Field::Title, title).await?;
            }
            if let Some(price) = price {
                session.set_field(Field::Price, price).await?;
            }
            if let Some(description) = description {
                session.set_field(Field::Description, description).await?;
            }
            if clear_images {
                clear_form_images(session).await?;
            }
            add_images(session, images).await?;
            let product = session.submit().await?;
            println!("Updated product {}", product.id);
            render_product(&product, 0);
        }
        Command::Delete { id } => {
            session.delete(id).await?;
            println!("Deleted product {id}");
        }
    }
    Ok(())
}

async fn add_images(session: &SessionClient, images: Vec<String>) -> Result<(), SessionError> {
    for url in images {
        session.set_field(Field::ImageUrl, url).await?;
        session.add_image().await?;
    }
    Ok(())
}

/// Removes every image from the open form. Returns how many were removed.
async fn clear_form_images(session: &SessionClient) -> Result<usize, SessionError> {
    let count = session
        .snapshot()
        .await?
        .form
        .map_or(0, |form| form.draft.images.len());
    for _ in 0..count {
        session.remove_image(0).await?;
    }
    Ok(count)
}

fn render(snapshot: &StorefrontSnapshot) {
    match &snapshot.view {
        ViewState::List => render_page(&snapshot.page, snapshot.error.as_deref()),
        ViewState::Detail(product) => render_product(product, snapshot.selected_image),
        ViewState::Add | ViewState::Edit(_) => {}
    }
}

fn render_page(page: &Page<Product>, error: Option<&str>) {
    if let Some(error) = error {
        println!("{error}");
    }
    for product in &page.content {
        println!("{}", card_line(product));
    }
    println!("{}", page.status_line());
}

/// One list entry: id, title, price, primary image and description summary.
fn card_line(product: &Product) -> String {
    format!(
        "{:>4}  {:<32} {:>10.2}  {:<24}  {}",
        product.id,
        product.title,
        product.price,
        product.primary_image().unwrap_or("-"),
        product.summary()
    )
}

fn render_product(product: &Product, selected_image: usize) {
    println!("{} (#{})", product.title, product.id);
    println!("Price: {:.2}", product.price);
    if let Some(seller) = &product.seller {
        println!("Seller: {} (#{})", seller.name, seller.id);
        for method in &seller.payment_methods {
            println!("  accepts {}", method.name);
        }
    }
    if let Some(description) = &product.description {
        println!("\n{description}\n");
    }
    for (i, url) in product.images.iter().enumerate() {
        let marker = if i == selected_image { '*' } else { ' ' };
        println!("{marker} {url}");
    }
}

/// Turns a failed command into the message printed on exit.
fn describe(error: SessionError) -> String {
    match error {
        SessionError::Storefront(StorefrontError::Form(FormError::Invalid(errors))) => errors
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join("\n"),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront::clients::mock::MockCatalog;
    use storefront::controller::Storefront;
    use storefront::session::SessionActor;

    #[test]
    fn test_card_line_shows_primary_image() {
        let product = Product::new(7, "Lamp", 19.99).with_images(["front.png", "back.png"]);
        let line = card_line(&product);
        assert!(line.contains("front.png"));
        assert!(!line.contains("back.png"));
        assert!(card_line(&Product::new(8, "Mug", 4.0)).contains(" - "));
    }

    #[tokio::test]
    async fn test_clear_form_images_stops_on_session_errors() {
        let mock = MockCatalog::new();
        mock.expect_get_product(7)
            .return_ok(Product::new(7, "Lamp", 19.99).with_images(["a.png", "b.png"]));
        let (actor, session) = SessionActor::new(4, Storefront::new(mock.clone(), 10));
        let handle = tokio::spawn(actor.run());

        session.fetch_and_edit(7).await.unwrap();
        assert_eq!(clear_form_images(&session).await.unwrap(), 2);
        let form = session.snapshot().await.unwrap().form.unwrap();
        assert!(form.draft.images.is_empty());

        handle.abort();
        let _ = handle.await;
        assert_eq!(clear_form_images(&session).await, Err(SessionError::Closed));
        mock.verify();
    }
}
