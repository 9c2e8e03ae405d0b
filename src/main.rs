use log::debug;
use std::env;

use recipe_matcher::store::format_recipe;
use recipe_matcher::{MatchError, MatchResult, MatcherConfig, RecipeFinder, SavedRecipeStore, Source};

const USAGE: &str = "Usage:
  recipe-matcher search <ingredients> [spices] [--source bbc|tasty]
  recipe-matcher show <recipe name>
  recipe-matcher subs <ingredient>
  recipe-matcher save <user> <recipe name>
  recipe-matcher saved <user>
  recipe-matcher delete <user> <recipe name>";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = args.first().ok_or(USAGE)?;

    let config = MatcherConfig::load()?;
    debug!("{:#?}", config);
    let finder = RecipeFinder::from_config(&config)?;
    let store = SavedRecipeStore::new(&config.data.saved_recipes);

    match command.as_str() {
        "search" => search(&finder, &args[1..])?,
        "show" => {
            let name = args.get(1).ok_or(USAGE)?;
            match finder.find_by_name(name) {
                Ok(recipe) => println!("{}", format_recipe(&recipe)),
                Err(e) => println!("{}", e),
            }
        }
        "subs" => {
            let ingredient = args.get(1).ok_or(USAGE)?;
            match finder.substitutes_for(ingredient) {
                Some(subs) if !subs.is_empty() => println!("{}", subs.join(", ")),
                _ => println!("No substitutions found for '{}'.", ingredient),
            }
        }
        "save" => {
            let (user, name) = user_and_name(&args)?;
            match finder.find_by_name(name) {
                Ok(recipe) => println!("{}", store.save(user, &recipe)?),
                Err(e) => println!("{}", e),
            }
        }
        "saved" => {
            let user = args.get(1).ok_or(USAGE)?;
            println!("{}", store.render(user));
        }
        "delete" => {
            let (user, name) = user_and_name(&args)?;
            println!("{}", store.delete(user, name)?);
        }
        _ => return Err(USAGE.into()),
    }

    Ok(())
}

fn user_and_name(args: &[String]) -> Result<(&str, &str), &'static str> {
    match (args.get(1), args.get(2)) {
        (Some(user), Some(name)) => Ok((user.as_str(), name.as_str())),
        _ => Err(USAGE),
    }
}

fn search(finder: &RecipeFinder, args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let mut source: Option<Source> = None;
    let mut fields: Vec<&str> = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--source" {
            let value = iter.next().ok_or(USAGE)?;
            source = Some(value.parse()?);
        } else {
            fields.push(arg);
        }
    }
    let primary = fields.first().copied().ok_or(USAGE)?;
    let secondary = fields.get(1).copied().unwrap_or("");

    let results = match source {
        Some(source) => finder.find_matches_in(source, primary, secondary),
        None => finder.find_matches(primary, secondary),
    };

    match results {
        Ok(results) if results.is_empty() => println!("No matching recipes found."),
        Ok(results) => results.iter().for_each(print_match),
        Err(MatchError::InvalidFormat) => eprintln!("{}", MatchError::InvalidFormat),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn print_match(result: &MatchResult<'_>) {
    println!(
        "{} [{}] ({}/{})",
        result.name(),
        result.source,
        result.matched_count(),
        result.total_ingredient_count
    );
    if !result.matched_ingredients.is_empty() {
        let matched: Vec<&str> = result.matched_ingredients.iter().map(String::as_str).collect();
        println!("    matched: {}", matched.join(", "));
    }
    for (ingredient, subs) in &result.substitutions {
        println!("    {} -> {}", ingredient, subs.join(", "));
    }
}
