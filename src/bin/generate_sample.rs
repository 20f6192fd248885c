use std::sync::Arc;

use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

#[derive(Serialize)]
struct Row {
    #[serde(rename = "Month")]
    month: String,
    #[serde(rename = "Sentiment")]
    sentiment: f64,
    #[serde(rename = "Subjectivity")]
    subjectivity: f64,
    #[serde(rename = "Dimension 1")]
    dim1: f64,
    #[serde(rename = "Dimension 2")]
    dim2: f64,
    #[serde(rename = "RawTweet")]
    raw_tweet: String,
}

const POSITIVE: &[&str] = &["love", "great", "amazing", "happy with", "excited about"];
const NEGATIVE: &[&str] = &["hate", "awful", "tired of", "disappointed by", "angry about"];
const NEUTRAL: &[&str] = &["saw", "read about", "heard of", "noticed", "talked about"];
const TOPICS: &[&str] = &[
    "the new phone",
    "the weather",
    "the game last night",
    "this album",
    "the election",
    "my commute",
    "the launch event",
];

fn compose(rng: &mut SimpleRng, sentiment: f64, subjectivity: f64) -> String {
    let verb = if sentiment > 0.2 {
        rng.pick(POSITIVE)
    } else if sentiment < -0.2 {
        rng.pick(NEGATIVE)
    } else {
        rng.pick(NEUTRAL)
    };
    let topic = rng.pick(TOPICS);
    if subjectivity > 0.6 {
        format!("Honestly I {verb} {topic}!!")
    } else {
        format!("I {verb} {topic}.")
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    // (month, cluster centre, sentiment mean)
    let months: [(&str, [f64; 2], f64); 5] = [
        ("January", [-6.0, 2.0], -0.1),
        ("February", [-2.0, -4.0], 0.2),
        ("March", [3.0, 5.0], 0.0),
        ("April", [6.0, -1.0], 0.35),
        ("May", [0.0, 0.0], -0.25),
    ];
    let per_month = 240;

    let mut rows = Vec::with_capacity(months.len() * per_month);
    for &(month, centre, mood) in &months {
        for _ in 0..per_month {
            let sentiment = rng.gauss(mood, 0.35).clamp(-1.0, 1.0);
            let subjectivity = rng.next_f64();
            let raw_tweet = compose(&mut rng, sentiment, subjectivity);
            rows.push(Row {
                month: month.to_string(),
                sentiment,
                subjectivity,
                dim1: rng.gauss(centre[0] + sentiment * 2.0, 1.5),
                dim2: rng.gauss(centre[1] + subjectivity * 2.0, 1.5),
                raw_tweet,
            });
        }
    }

    std::fs::create_dir_all("datasets").expect("Failed to create datasets/");

    // Write CSV
    let csv_path = "datasets/ProcessedTweets.csv";
    let mut writer = csv::Writer::from_path(csv_path).expect("Failed to create CSV");
    for row in &rows {
        writer.serialize(row).expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV");

    // Build Arrow arrays
    let schema = Arc::new(Schema::new(vec![
        Field::new("Month", DataType::Utf8, false),
        Field::new("Sentiment", DataType::Float64, false),
        Field::new("Subjectivity", DataType::Float64, false),
        Field::new("Dimension 1", DataType::Float64, false),
        Field::new("Dimension 2", DataType::Float64, false),
        Field::new("RawTweet", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.month.as_str()))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.sentiment))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.subjectivity))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.dim1))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.dim2))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.raw_tweet.as_str()))),
        ],
    )
    .expect("Failed to create RecordBatch");

    // Write Parquet
    let parquet_path = "datasets/ProcessedTweets.parquet";
    let file = std::fs::File::create(parquet_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    println!(
        "Wrote {} tweets across {} months to {csv_path} and {parquet_path}",
        rows.len(),
        months.len()
    );
}
