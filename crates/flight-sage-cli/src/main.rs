// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use flight_sage_core::airports::AirportCatalog;
use flight_sage_core::destinations::DestinationTable;
use flight_sage_core::planner::RoutePlanner;
use flight_sage_core::settings::{Settings, SettingsManager};
use flight_sage_core::weather::WeatherReport;
use flight_sage_core::{Coordinate, Route, RouteCalculator, RouteOptions};
use flight_sage_voice::{current_location, route_request, Intent, RouteRequest, VoiceCommand};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to settings.json
    #[arg(short, long, env = "FLIGHT_SAGE_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a route. Places are "lat,lon", a city, or an airport code/name
    Route {
        /// Origin (defaults to the configured default origin)
        #[arg(long)]
        from: Option<String>,
        /// Destination
        #[arg(long)]
        to: String,
        /// Cruise speed in km/h for the time estimate
        #[arg(long)]
        speed: Option<f64>,
        #[arg(long)]
        json: bool,
    },
    /// List airports, optionally only those near a place
    Airports {
        #[arg(long)]
        near: Option<String>,
        /// Search radius in km (defaults to the configured radius)
        #[arg(long)]
        radius: Option<f64>,
        #[arg(long)]
        json: bool,
    },
    /// Show current weather
    Weather {
        #[arg(long)]
        json: bool,
    },
    /// Interpret a spoken/typed command
    Ask {
        text: String,
        /// Current location, used for "here" and when no origin is spoken
        #[arg(long)]
        from: Option<String>,
    },
    /// Update stored settings
    Config {
        /// Default origin used when --from is not given
        #[arg(long)]
        origin: Option<String>,
        #[arg(long)]
        speed: Option<f64>,
        /// Waypoint offset in degrees
        #[arg(long)]
        offset: Option<f64>,
        #[arg(long)]
        radius: Option<f64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    TermLogger::init(
        level,
        ConfigBuilder::new().set_time_level(LevelFilter::Off).build(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let settings_manager = match &cli.config {
        Some(path) => SettingsManager::with_path(path),
        None => SettingsManager::new(),
    };
    let settings = settings_manager.load()?;

    let catalog = AirportCatalog::builtin().context("Built-in airport list is broken")?;
    let table = DestinationTable::new(catalog);

    match cli.command {
        Commands::Route {
            from,
            to,
            speed,
            json,
        } => {
            let mut options = settings.route_options()?;
            if let Some(kmh) = speed {
                options = RouteOptions::new(options.waypoint_offset_deg(), kmh)?;
            }
            let origin = resolve_origin(&table, from.as_deref(), &settings)?;

            let mut planner = RoutePlanner::new(RouteCalculator::new(options), table);
            planner.on_route_calculated(|r| {
                log::info!("Route calculated — id={} distance_km={:.0}", r.id, r.distance_km)
            });
            planner.set_origin(origin)?;
            if !planner.search_destination(&to)? {
                bail!("Unknown destination '{}'", to);
            }
            let route = planner
                .route()
                .ok_or_else(|| anyhow!("No route between {} and '{}'", origin, to))?;
            print_route(route, json)?;
        }
        Commands::Airports { near, radius, json } => {
            let catalog = table.airports();
            let listed: Vec<(&_, Option<f64>)> = match near {
                Some(place) => {
                    let at = resolve_place(&table, &place)?;
                    let radius = radius.unwrap_or(settings.nearby_radius_km);
                    catalog
                        .nearby(at, radius)
                        .into_iter()
                        .map(|(a, d)| (a, Some(d)))
                        .collect()
                }
                None => catalog.all().iter().map(|a| (a, None)).collect(),
            };

            if json {
                let airports: Vec<_> = listed.iter().map(|(a, _)| *a).collect();
                println!("{}", serde_json::to_string_pretty(&airports)?);
            } else if listed.is_empty() {
                println!("No airports found.");
            } else {
                for (apt, dist) in listed {
                    let dist = dist.map(|d| format!(" {:>6.0} km", d)).unwrap_or_default();
                    println!(
                        "{:<4} {:<9}{} {} ({})",
                        apt.code,
                        apt.category.to_string(),
                        dist,
                        apt.name,
                        apt.facilities.join(", ")
                    );
                }
            }
        }
        Commands::Weather { json } => {
            if !settings.show_weather {
                println!("Weather display is disabled in settings.");
                return Ok(());
            }
            print_weather(&WeatherReport::mock(), json)?;
        }
        Commands::Ask { text, from } => {
            let cmd = VoiceCommand::parse(&text);
            println!("Panel: {}", cmd.panel());

            let here = current_location(&table, from.as_deref(), settings.default_origin)?;

            match cmd.intent {
                Some(Intent::Weather) => print_weather(&WeatherReport::mock(), false)?,
                Some(Intent::Location) => match here {
                    Some(at) => {
                        println!("Current location: {}", at);
                        if let Some((apt, d)) = table.airports().nearest(at) {
                            println!("Nearest airport: {} {} ({:.0} km)", apt.code, apt.name, d);
                        }
                    }
                    None => {
                        println!("Current location unknown. Pass --from or configure an origin.")
                    }
                },
                _ => {}
            }

            let endpoints = match route_request(&cmd, here, &table) {
                Ok(RouteRequest::Ready(endpoints)) => endpoints,
                Ok(RouteRequest::MissingOrigin { destination }) => {
                    println!("Destination {} noted; no origin known yet.", destination);
                    return Ok(());
                }
                Ok(RouteRequest::NotRequested) => return Ok(()),
                Err(e) => {
                    println!("{}", e);
                    return Ok(());
                }
            };

            let mut planner =
                RoutePlanner::new(RouteCalculator::new(settings.route_options()?), table);
            planner.set_origin(endpoints.origin)?;
            planner.set_destination(endpoints.destination)?;
            if let Some(route) = planner.route() {
                print_route(route, false)?;
            }
        }
        Commands::Config {
            origin,
            speed,
            offset,
            radius,
        } => {
            let mut updated = settings.clone();
            if let Some(place) = origin {
                updated.default_origin = Some(resolve_place(&table, &place)?);
            }
            if let Some(kmh) = speed {
                updated.cruise_speed_kmh = kmh;
            }
            if let Some(deg) = offset {
                updated.waypoint_offset_deg = deg;
            }
            if let Some(km) = radius {
                updated.nearby_radius_km = km;
            }
            updated.validate()?;

            if updated != settings {
                settings_manager.save(&updated)?;
            }
            println!("{}", serde_json::to_string_pretty(&updated)?);
            println!("Settings file: {}", settings_manager.path().display());
        }
    }

    Ok(())
}

fn resolve_place(table: &DestinationTable, place: &str) -> Result<Coordinate> {
    table.resolve(place).ok_or_else(|| {
        anyhow!(
            "Unknown place '{}'. Use 'lat,lon', a city, or an airport code.",
            place
        )
    })
}

fn resolve_origin(
    table: &DestinationTable,
    from: Option<&str>,
    settings: &Settings,
) -> Result<Coordinate> {
    match from {
        Some(place) => resolve_place(table, place),
        None => settings.default_origin.ok_or_else(|| {
            anyhow!("No origin. Pass --from or set one with `flight-sage config --origin`.")
        }),
    }
}

fn print_route(route: &Route, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(route)?);
        return Ok(());
    }
    println!("Route Information");
    println!("{}", route);
    println!("Path:");
    for point in route.path() {
        println!("  {}", point);
    }
    let extent = route.extent();
    println!("Map extent: {}", extent);
    println!("Map center: {}", extent.center());
    Ok(())
}

fn print_weather(report: &WeatherReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("Weather");
        println!("{}", report);
        println!("Flight conditions: {}", report.condition());
    }
    Ok(())
}
