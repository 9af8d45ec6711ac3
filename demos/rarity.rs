use std::collections::HashMap;
use vose_alias::{AliasTables, WeightedOutcome, draw_n};

#[derive(Copy, Eq, PartialEq, Clone, Debug, Hash, WeightedOutcome)]
enum Rarity {
    #[weight(1/1000)]
    Mythic,
    #[weight(1/100)]
    Legendary,
    #[weight(20/100)]
    Uncommon,
    #[weight(50/100)]
    Common,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Build straight from the enum:
    let tables = Rarity::alias_tables()?;

    // Or mix arbitrary labels with weights:
    let _custom: AliasTables<&'static str> =
        AliasTables::from_weights([("sword", 1.0), ("shield", 3.0)])?;

    let mut rng = rand::rng();
    let draws = draw_n(&tables, &mut rng, 2_000_000)?;

    let mut hist: HashMap<Rarity, u64> = HashMap::default();
    for r in draws {
        *hist.entry(r).or_default() += 1;
    }

    let mut values: Vec<(Rarity, u64)> = hist.into_iter().collect();
    values.sort_by(|(_, ca), (_, cb)| cb.cmp(ca));

    for (rarity, count) in values {
        let expected = tables.distribution().probability(&rarity).unwrap_or(0.0);
        println!("{count: >8} {rarity:?} (expected {:.4})", expected);
    }

    Ok(())
}
