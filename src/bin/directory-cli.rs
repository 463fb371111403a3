use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use url::Url;

use doctor_directory::config::ObservabilityConfig;
use doctor_directory::directory::controller::{Location, MemoryLocation, PageController};
use doctor_directory::directory::filter::{available_specialties, is_selectable_specialty};
use doctor_directory::directory::{ConsultationMode, SortKey};
use doctor_directory::http::response::{DoctorCard, ListingView};
use doctor_directory::observability::logging;
use doctor_directory::upstream::{DoctorClient, DoctorSource};

#[derive(Parser)]
#[command(name = "directory-cli")]
#[command(about = "Browse the doctor directory from the terminal", long_about = None)]
struct Cli {
    /// Base URL of the directory service
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List doctors matching the given filters
    List(ListArgs),
    /// List the specialties present in the dataset
    Specialties,
    /// Check service status
    Status,
}

#[derive(Args)]
struct ListArgs {
    /// Starting query string, e.g. "mode=video_consult&sort=fees"
    #[arg(short, long)]
    query: Option<String>,

    /// Doctor name, or part of it
    #[arg(short, long)]
    search: Option<String>,

    /// video_consult or in_clinic
    #[arg(short, long)]
    mode: Option<ConsultationMode>,

    /// Toggle a specialty; repeat for several
    #[arg(long = "specialty")]
    specialties: Vec<String>,

    /// fees or experience
    #[arg(long)]
    sort: Option<SortKey>,

    /// Print the listing as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let quiet = ObservabilityConfig {
        log_level: "warn".to_string(),
        ..ObservabilityConfig::default()
    };
    let _ = logging::init_logging(&quiet);

    let base = Url::parse(&cli.url)?;
    let doctors_endpoint = base.join("/api/doctors")?;
    let client = DoctorClient::new(doctors_endpoint.as_str())?;

    match cli.command {
        Commands::List(args) => list(&client, args).await?,
        Commands::Specialties => {
            let doctors = client.fetch_doctors().await?;
            for name in available_specialties(&doctors) {
                println!("{}", name);
            }
        }
        Commands::Status => {
            let res = reqwest::get(base.join("/status")?).await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn list(client: &DoctorClient, args: ListArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut page = PageController::new(MemoryLocation::new(args.query.unwrap_or_default()));
    page.mount(client).await;

    if let Some(search) = args.search {
        page.set_search(search);
    }
    if let Some(mode) = args.mode {
        page.set_consultation_mode(mode);
    }
    for specialty in &args.specialties {
        if !is_selectable_specialty(specialty) {
            eprintln!("Ignoring specialty '{}': names may not be empty or contain ','", specialty);
            continue;
        }
        page.toggle_specialty(specialty);
    }
    if let Some(sort) = args.sort {
        page.set_sort(sort);
    }

    if args.json {
        let view = ListingView::from_page(&page);
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("{}", page.heading());
    println!();
    if page.no_results() {
        println!("No doctors found");
        println!("Try adjusting your filters or search term");
    }
    for doctor in page.filtered() {
        print_card(&DoctorCard::from(doctor));
    }
    println!("?{}", page.location().query());
    Ok(())
}

fn print_card(card: &DoctorCard) {
    println!("{} [{}]", card.name, card.initials);
    if !card.specialties.is_empty() {
        println!("  {}", card.specialties.join(", "));
    }
    println!("  {} | {}", card.experience, card.fees);

    let mut tags = Vec::new();
    if card.video_consult {
        tags.push("Video Consult Available".to_string());
    }
    if card.in_clinic {
        tags.push("In-Clinic Consultation".to_string());
    }
    if let Some(location) = &card.location {
        tags.push(location.clone());
    }
    if !tags.is_empty() {
        println!("  {}", tags.join(" | "));
    }
    println!("  {}", card.introduction);
    println!();
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
