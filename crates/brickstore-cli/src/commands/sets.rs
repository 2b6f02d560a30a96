//! LEGO set commands
//!
//! Usage:
//!   brickstore add --name <NAME> [--min-age N] [--max-age N]
//!                  [--manual-author A --manual-text T] [--model NAME=DESCRIPTION]...
//!   brickstore show <ID> | list | remove <ID>

use clap::Args;

use brickstore_core::{LegoSet, Manual, Result};

use super::context::Context;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Set name
    #[arg(long)]
    pub name: String,

    /// Minimum age in years
    #[arg(long, default_value_t = 0)]
    pub min_age: u32,

    /// Maximum age in years
    #[arg(long, default_value_t = 99)]
    pub max_age: u32,

    /// Manual author (requires --manual-text)
    #[arg(long, requires = "manual_text")]
    pub manual_author: Option<String>,

    /// Manual text
    #[arg(long, requires = "manual_author")]
    pub manual_text: Option<String>,

    /// Model as NAME=DESCRIPTION (repeatable)
    #[arg(long = "model", value_parser = parse_model)]
    pub models: Vec<(String, String)>,
}

#[derive(Debug, Args)]
pub struct IdArgs {
    /// LEGO set id
    pub id: i32,
}

fn parse_model(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, description)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), description.to_string()))
        }
        _ => Err(format!("expected NAME=DESCRIPTION, got '{}'", s)),
    }
}

pub fn add(ctx: &mut Context, args: AddArgs) -> Result<()> {
    let mut set = LegoSet::new(args.name).with_age_range(args.min_age, args.max_age);
    if let (Some(author), Some(text)) = (args.manual_author, args.manual_text) {
        set.set_manual(Manual::new(author, text));
    }
    for (name, description) in args.models {
        set.add_model(name, description);
    }

    let id = ctx.repo.save(&mut ctx.conn, &mut set)?;
    println!("✓ Saved LEGO set {}", id);
    Ok(())
}

pub fn show(ctx: &Context, args: IdArgs) -> Result<()> {
    let set = ctx.repo.get(&ctx.conn, args.id)?;
    print!("{}", render(&set));
    Ok(())
}

pub fn list(ctx: &Context) -> Result<()> {
    let sets = ctx.repo.find_all(&ctx.conn)?;
    if sets.is_empty() {
        println!("No LEGO sets stored");
    }
    for set in &sets {
        print!("{}", render(set));
    }
    Ok(())
}

pub fn remove(ctx: &mut Context, args: IdArgs) -> Result<()> {
    if ctx.repo.delete_by_id(&mut ctx.conn, args.id)? {
        println!("✓ Removed LEGO set {}", args.id);
    } else {
        println!("No LEGO set {}", args.id);
    }
    Ok(())
}

fn render(set: &LegoSet) -> String {
    let mut out = format!(
        "#{} {} (ages {}-{})\n",
        set.id, set.name, set.minimum_age, set.maximum_age
    );
    if let Some(manual) = &set.manual {
        out.push_str(&format!("  manual by {}: {}\n", manual.author, manual.text));
    }
    for (key, model) in &set.models {
        out.push_str(&format!("  model {}: {}\n", key, model.description));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_model() {
        assert_eq!(
            parse_model("FAST_TIE=Small TIE fighter").unwrap(),
            ("FAST_TIE".to_string(), "Small TIE fighter".to_string())
        );
        assert_eq!(
            parse_model("eq=a=b").unwrap(),
            ("eq".to_string(), "a=b".to_string())
        );
        assert!(parse_model("no-separator").is_err());
        assert!(parse_model("=nameless").is_err());
    }

    #[test]
    fn test_render() {
        let mut set = LegoSet::new("Tower").with_age_range(6, 10);
        set.id = 3;
        set.set_manual(Manual::new("Alfred", "Stack it"));
        set.add_model("base", "Grey plate");

        assert_eq!(
            render(&set),
            "#3 Tower (ages 6-10)\n  manual by Alfred: Stack it\n  model base: Grey plate\n"
        );
    }
}
