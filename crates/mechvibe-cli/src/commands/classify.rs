//! Key classification command.

use clap::Args;
use mechvibe_core::{classify, key_position_pan};
use mechvibe_io::category_gain;

#[derive(Args)]
pub struct ClassifyArgs {
    /// Key label as a keyboard event reports it ("a", "Enter", " " for space)
    #[arg(value_name = "LABEL")]
    label: String,

    /// Physical key code ("KeyA", "ShiftLeft", ...)
    #[arg(short, long, default_value = "")]
    code: String,
}

pub fn run(args: ClassifyArgs) -> anyhow::Result<()> {
    let category = classify(&args.label, &args.code);
    println!("Label:    {:?}", args.label);
    println!("Code:     {:?}", args.code);
    println!("Category: {category}");
    println!("Gain:     {:.1}", category_gain(category));
    println!("Pan:      {:+.1}", key_position_pan(&args.label, &args.code));
    Ok(())
}
