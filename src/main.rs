//! NEAT seed CLI - Build a seed population from JSON configuration.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use neat_seed::{
    compute::Seeder,
    schema::{NeatConfig, NeuronType},
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json> [population.json]", args[0]);
        eprintln!();
        eprintln!("Seed a NEAT population from JSON configuration.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json      Path to configuration file");
        eprintln!("  population.json  Where to write the seeded population (optional)");
        eprintln!();
        eprintln!("Example configuration is printed with --example flag.");
        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_config();
        return;
    }

    let config_path = PathBuf::from(&args[1]);
    let config = NeatConfig::load(&config_path).unwrap_or_else(|e| {
        eprintln!("Error loading config: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = config.speciation.validate() {
        eprintln!("Invalid speciation settings: {}", e);
        std::process::exit(1);
    }

    println!("NEAT Seed");
    println!("=========");
    println!("{}", config.seed);
    println!(
        "Speciation: target {} species, threshold {} (step {})",
        config.speciation.target_species,
        config.speciation.compatibility_threshold,
        config.speciation.compatibility_modifier
    );
    println!();

    let start = Instant::now();
    let population = Seeder::new(config.seed.clone())
        .populate()
        .unwrap_or_else(|e| {
            eprintln!("Error seeding population: {}", e);
            std::process::exit(1);
        });
    let elapsed = start.elapsed();

    let template = &population.species[0].example;
    println!("Generation {}:", population.generation);
    println!("  Genomes: {}", population.genomes.len());
    println!("  Species: {}", population.species_count());
    println!(
        "  Nodes: {} ({} inputs, {} outputs, 1 bias)",
        template.nodes.len(),
        template.nodes_of(NeuronType::Input).count(),
        template.nodes_of(NeuronType::Output).count()
    );
    println!("  Connections per genome: {}", template.conns.len());
    println!("Time: {:.3}ms", elapsed.as_secs_f64() * 1000.0);

    if let Some(out) = args.get(2) {
        let json = serde_json::to_string_pretty(&population).unwrap_or_else(|e| {
            eprintln!("Error serializing population: {}", e);
            std::process::exit(1);
        });
        fs::write(out, json).unwrap_or_else(|e| {
            eprintln!("Error writing {}: {}", out, e);
            std::process::exit(1);
        });
        println!();
        println!("Population written to {}", out);
    }
}

fn print_example_config() {
    let config = NeatConfig::default();

    match serde_json::to_string_pretty(&config) {
        Ok(json) => {
            println!("Example configuration (config.json):");
            println!("{}", json);
        }
        Err(e) => {
            eprintln!("Error serializing example config: {}", e);
            std::process::exit(1);
        }
    }
}
