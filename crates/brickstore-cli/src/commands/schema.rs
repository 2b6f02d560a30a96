//! Schema commands
//!
//! Usage: brickstore init | brickstore columns

use brickstore_core::Result;

use super::context::Context;

/// Migrations already ran when the context opened; report the result
pub fn init(ctx: &mut Context) -> Result<()> {
    let sets = ctx.repo.count(&ctx.conn)?;
    println!("✓ Schema up to date ({} sets stored)", sets);
    Ok(())
}

pub fn columns(ctx: &Context) -> Result<()> {
    let rows = ctx.repo.names().describe();
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, name) in rows {
        println!("{:width$}  {}", label, name, width = width);
    }
    Ok(())
}
