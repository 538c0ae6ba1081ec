use std::env;

use anyhow::{Context, Result, bail};
use vorlage_gloss::Glosser;

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let text = args
        .next()
        .context("usage: cargo run -p vorlage-gloss --example gloss -- \"<hebrew text>\" [--demo]")?;
    if args.next().is_some() {
        bail!("too many arguments");
    }

    let verses: Vec<String> = if text == "--demo" {
        vec![
            "בְּרֵאשִׁית בָּרָא אֱלֹהִים אֵת הַשָּׁמַיִם וְאֵת הָאָרֶץ׃".into(),
            "הִנֵּה הָעַלְמָה הָרָה וְיֹלֶדֶת בֵּן".into(),
            "כָּאֲרִי יָדַי וְרַגְלָי".into(),
        ]
    } else {
        vec![text]
    };

    let glosser = Glosser::seed();
    for verse in verses {
        println!("\n{verse}");
        for word in glosser.gloss_verse(&verse) {
            println!("  {:<12} {} [{:?}]", word.gloss, word.surface, word.origin);
        }
    }

    Ok(())
}
