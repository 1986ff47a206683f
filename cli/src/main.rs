//! unafp CLI - AFP print-stream inspection tool

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use colored::Colorize;

use unafp::{parse_file_with_options, AfpModel, Area, FindOptions, ParseOptions, TextOptions};

#[derive(Parser)]
#[command(name = "unafp")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Inspect and extract AFP print streams", long_about = None)]
struct Cli {
    /// Keep unknown structured fields instead of failing
    #[arg(long, global = true)]
    permissive: bool,

    /// Do not merge overlay inclusions into page text
    #[arg(long, global = true)]
    no_overlays: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print decode statistics
    Stats {
        /// Input AFP file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Emit statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Extract text, pages separated by form feeds
    Text {
        /// Input AFP file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Restrict to an inclusive area: x1,y1,x2,y2 in 1/1440-inch units
        #[arg(long, value_name = "BOX", value_parser = parse_area)]
        area: Option<Area>,

        /// Separator between elements
        #[arg(long, default_value = "\n")]
        delimiter: String,
    },

    /// Search for text across all pages
    Find {
        /// Input AFP file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Pattern to search for
        #[arg(value_name = "PATTERN")]
        pattern: String,

        /// Treat the pattern as a plain substring, not a regex
        #[arg(long)]
        substring: bool,

        /// Require whole element text to match
        #[arg(long)]
        exact: bool,

        /// Restrict to a 24-bit RGB color, e.g. ff0000
        #[arg(long, value_parser = parse_color)]
        color: Option<u32>,

        /// Emit matches as JSON
        #[arg(long)]
        json: bool,
    },

    /// List named resources
    Resources {
        /// Input AFP file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Write embedded images to a directory
    ExportImages {
        /// Input AFP file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory, created if absent
        #[arg(short, long, value_name = "DIR", default_value = "resources")]
        output: PathBuf,
    },
}

fn parse_area(value: &str) -> Result<Area, String> {
    let parts: Vec<&str> = value.split(',').collect();
    if parts.len() != 4 {
        return Err("area must be x1,y1,x2,y2".to_string());
    }
    let mut bounds = [0u32; 4];
    for (slot, part) in bounds.iter_mut().zip(&parts) {
        *slot = part
            .trim()
            .parse()
            .map_err(|_| format!("invalid coordinate {:?}", part))?;
    }
    Ok(Area::new(bounds[0], bounds[1], bounds[2], bounds[3]))
}

fn parse_color(value: &str) -> Result<u32, String> {
    u32::from_str_radix(value.trim_start_matches("0x"), 16)
        .map_err(|_| format!("invalid color {:?}", value))
}

fn load(input: &PathBuf, cli: &Cli) -> unafp::Result<AfpModel> {
    let mut options = ParseOptions::new();
    if cli.permissive {
        options = options.permissive();
    }
    if cli.no_overlays {
        options = options.without_overlays();
    }
    parse_file_with_options(input, options)
}

fn print_stats(input: &PathBuf, model: &AfpModel, json: bool) -> unafp::Result<()> {
    let stats = &model.diagnostics;
    if json {
        println!("{}", serde_json::to_string_pretty(stats).unwrap());
        return Ok(());
    }

    println!("{}", format!("-- AFP stats for {} --", input.display()).bold());
    println!("   Decode time:  {:.2?}", stats.decode_time);
    print!("   Total fields: {}", stats.field_count);
    if stats.unknown_field_count > 0 {
        print!(
            " {}",
            format!("({} unknown)", stats.unknown_field_count).yellow()
        );
    }
    println!();
    if stats.skipped_function_count > 0 {
        println!(
            "   Skipped text functions: {}",
            stats.skipped_function_count.to_string().yellow()
        );
    }
    println!("   Resources:    {}", stats.resource_count);
    println!("   Documents:    {}", stats.document_count);
    println!("   Pages:        {}", stats.page_count);
    Ok(())
}

fn run(cli: &Cli) -> unafp::Result<()> {
    match &cli.command {
        Commands::Stats { input, json } => {
            let model = load(input, cli)?;
            print_stats(input, &model, *json)?;
        }

        Commands::Text {
            input,
            area,
            delimiter,
        } => {
            let model = load(input, cli)?;
            let mut options = TextOptions::new().with_delimiter(delimiter.clone());
            if let Some(area) = area {
                options = options.in_area(*area);
            }
            println!("{}", model.get_text_with(&options));
        }

        Commands::Find {
            input,
            pattern,
            substring,
            exact,
            color,
            json,
        } => {
            let model = load(input, cli)?;
            let mut options = FindOptions::new();
            if *substring {
                options = options.substring();
            }
            if *exact {
                options = options.exact();
            }
            if let Some(color) = color {
                options = options.with_color(*color);
            }

            let results = model.find_text(pattern, &options)?;
            if *json {
                let rows: Vec<_> = results
                    .iter()
                    .map(|(page, element)| {
                        serde_json::json!({
                            "page": page,
                            "inline": element.inline,
                            "baseline": element.baseline,
                            "color": format!("{:06x}", element.color),
                            "text": element.text_content(),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows).unwrap());
            } else if results.is_empty() {
                println!("{}", "no matches".dimmed());
            } else {
                for (page, element) in results {
                    println!(
                        "{} {} {}",
                        format!("page {}", page).cyan(),
                        format!("({}, {})", element.inline, element.baseline).dimmed(),
                        element.text_content().unwrap_or_default()
                    );
                }
            }
        }

        Commands::Resources { input } => {
            let model = load(input, cli)?;
            for name in model.resource_names() {
                let resource = model.get_resource(name).unwrap();
                let kind = if resource.is_overlay() {
                    "overlay".green()
                } else if resource.is_image() {
                    "image".blue()
                } else {
                    "raw".dimmed()
                };
                println!("{:<10} {}", kind, name);
            }
        }

        Commands::ExportImages { input, output } => {
            let model = load(input, cli)?;
            let count = model.export_images(output)?;
            println!(
                "{} {} resources ({} written to {})",
                "ok:".green().bold(),
                count,
                model
                    .resources
                    .values()
                    .filter(|r| r.is_image())
                    .count(),
                output.display()
            );
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("{} {}", "error:".red().bold(), err);
        process::exit(1);
    }
}
