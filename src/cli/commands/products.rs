use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Subcommand;
use uuid::Uuid;

use crate::catalog::{CatalogClient, CatalogState, ProductForm, SubmitTarget, PAGE_SIZE};

#[derive(Subcommand)]
pub enum ProductCommands {
    #[command(about = "List one page of the catalog")]
    List {
        #[arg(long, default_value = "", help = "Case-insensitive name filter")]
        search: String,
        #[arg(long, default_value_t = 1, help = "1-based page number")]
        page: u32,
    },

    #[command(about = "Show a single product")]
    Show {
        #[arg(help = "Product id")]
        id: Uuid,
    },

    #[command(about = "Create a product, uploading an image first if given")]
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long, help = "Price, e.g. 19.99")]
        price: String,
        #[arg(long, help = "Path to an image file to upload")]
        image: Option<PathBuf>,
    },

    #[command(about = "Edit a product; omitted fields keep their current value")]
    Update {
        #[arg(help = "Product id")]
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        price: Option<String>,
        #[arg(long, help = "Path to a replacement image file")]
        image: Option<PathBuf>,
    },

    #[command(about = "Delete a product")]
    Delete {
        #[arg(help = "Product id")]
        id: Uuid,
        #[arg(long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

pub async fn handle(cmd: ProductCommands, client: &CatalogClient) -> anyhow::Result<()> {
    match cmd {
        ProductCommands::List { search, page } => {
            let mut state = CatalogState::new(PAGE_SIZE);
            state.set_search(search);
            state.set_page(page);
            client.refresh(&mut state).await;

            if let Some(error) = &state.error {
                anyhow::bail!("{}", error);
            }
            if state.products.is_empty() {
                println!("No products found.");
                return Ok(());
            }
            for product in &state.products {
                println!("{}  {:<30} ${}", product.id, product.name, product.price);
            }
            println!(
                "page {} of {} ({} total)",
                state.page,
                state.total_pages(),
                state.total
            );
            Ok(())
        }

        ProductCommands::Show { id } => {
            let product = client.get(id).await?;
            println!("{:<12} {}", "id:", product.id);
            println!("{:<12} {}", "name:", product.name);
            println!("{:<12} {}", "description:", product.description);
            println!("{:<12} ${}", "price:", product.price);
            if !product.image.is_empty() {
                println!("{:<12} {}", "image:", product.image);
            }
            Ok(())
        }

        ProductCommands::Create {
            name,
            description,
            price,
            image,
        } => {
            let mut form = ProductForm {
                name,
                description,
                price,
                ..Default::default()
            };
            if let Some(path) = image {
                form.choose_image(path);
            }
            let product = client.submit(&mut form, SubmitTarget::Create).await?;
            println!("Created product {}", product.id);
            Ok(())
        }

        ProductCommands::Update {
            id,
            name,
            description,
            price,
            image,
        } => {
            // Prefill from the current record so omitted fields survive
            let current = client.get(id).await?;
            let mut form = ProductForm::from_product(&current);
            if let Some(name) = name {
                form.name = name;
            }
            if let Some(description) = description {
                form.description = description;
            }
            if let Some(price) = price {
                form.price = price;
            }
            if let Some(path) = image {
                form.choose_image(path);
            }
            let product = client.submit(&mut form, SubmitTarget::Edit(id)).await?;
            println!("Updated product {}", product.id);
            Ok(())
        }

        ProductCommands::Delete { id, yes } => {
            if !yes && !confirm("Are you sure you want to delete this product?")? {
                println!("Aborted.");
                return Ok(());
            }
            client.delete(id).await?;
            println!("Product deleted");
            Ok(())
        }
    }
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}
