use anyhow::Result;

use futstat::data::model::Roster;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

const PLAYER_COUNT: usize = 150;

// League, clubs, and the league's mean rating for the normal draw.
const LEAGUES: [(&str, &[&str], f64); 5] = [
    ("Premier League", &["Arsenal", "Liverpool", "Manchester City", "Chelsea"], 79.0),
    ("LaLiga", &["Real Madrid", "Barcelona", "Atletico Madrid"], 78.0),
    ("Serie A", &["Inter", "Juventus", "Napoli"], 76.0),
    ("Bundesliga", &["Bayern Munich", "Leverkusen", "Dortmund"], 76.0),
    ("Ligue 1", &["PSG", "Monaco", "Marseille"], 73.0),
];

// The export's position encoding.
const POSITION_CODES: [u8; 15] = [0, 2, 3, 5, 7, 8, 10, 12, 14, 16, 18, 21, 23, 25, 27];

const FIRST_NAMES: [&str; 20] = [
    "Marco", "Luka", "Kylian", "Erling", "Jude", "Pedri", "Bukayo", "Declan", "Phil", "Trent",
    "Virgil", "Rodrigo", "Gavi", "Jamal", "Florian", "Victor", "Rafael", "Nico", "Martin", "Cole",
];

const SURNAMES: [&str; 20] = [
    "Silva", "Modric", "Hernandez", "Haaland", "Bellingham", "Gonzalez", "Saka", "Rice", "Foden",
    "Alexander-Arnold", "van Dijk", "De Paul", "Martinez", "Musiala", "Wirtz", "Osimhen", "Leao",
    "Williams", "Odegaard", "Palmer",
];

fn rarity_for(rating: u8, rng: &mut SimpleRng) -> &'static str {
    if rng.chance(0.03) {
        return "Team of the Week";
    }
    if rng.chance(0.02) {
        return "Hero";
    }
    if rating >= 75 || rng.chance(0.3) {
        "Rare"
    } else {
        "Common"
    }
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "club-analyzer.csv".to_string());

    let mut rng = SimpleRng::new(42);

    let mut writer = csv::Writer::from_path(&output_path)?;
    writer.write_record(Roster::column_names())?;

    let mut next_id = 150_000_000 + rng.next_u64() % 1_000_000;
    for _ in 0..PLAYER_COUNT {
        let &(league, clubs, mean) = rng.pick(&LEAGUES);
        let club = rng.pick(clubs);
        let rating = rng.gauss(mean, 6.0).round().clamp(48.0, 99.0) as u8;
        let rarity = rarity_for(rating, &mut rng);

        next_id += 1 + rng.next_u64() % 40;
        writer.write_record([
            next_id.to_string(),
            rng.pick(&FIRST_NAMES).to_string(),
            rng.pick(&SURNAMES).to_string(),
            rating.to_string(),
            rng.pick(&POSITION_CODES).to_string(),
            club.to_string(),
            league.to_string(),
            rarity.to_string(),
            if rng.chance(0.06) { "1" } else { "0" }.to_string(),
        ])?;
    }
    writer.flush()?;

    println!("Wrote {PLAYER_COUNT} players to {output_path}");
    Ok(())
}
