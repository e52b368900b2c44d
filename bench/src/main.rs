use graph_bisect_core::{bisect, BisectConfig, EdgeTally, Graph, GraphBuilder, Selection, ShortestPaths};
use std::time::Instant;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let cluster_size: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(60);

    if mode == "help" || mode == "--help" {
        println!("Usage: graph-bisect-bench [mode] [cluster_size]");
        println!();
        println!("Modes:");
        println!("  all         Run all generators and benchmark each (default)");
        println!("  barbell     Two dense clusters joined by three bridge edges");
        println!("  ring        Two ring lattices joined by three bridge edges");
        println!("  random      Two Erdos-Renyi clusters joined by three bridge edges");
        println!();
        println!("Default cluster_size: 60 (graph has 2x that many vertices)");
        return;
    }

    if cluster_size < 8 {
        eprintln!("cluster_size must be at least 8, got {}", cluster_size);
        return;
    }

    println!("graph-bisect-bench");
    println!("==================");
    println!();

    let generators: Vec<(&str, fn(u64) -> Graph)> = match mode {
        "barbell" => vec![("Barbell (cluster-bridge-cluster)", gen_barbell)],
        "ring" => vec![("Twin ring lattices", gen_rings)],
        "random" => vec![("Twin Erdos-Renyi", gen_random)],
        "all" => vec![
            ("Barbell (cluster-bridge-cluster)", gen_barbell as fn(u64) -> Graph),
            ("Twin ring lattices", gen_rings),
            ("Twin Erdos-Renyi", gen_random),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        run_benchmark(name, generator, cluster_size);
    }
}

fn run_benchmark(name: &str, generator: fn(u64) -> Graph, cluster_size: u64) {
    println!("--- {} ---", name);

    let t = Instant::now();
    let graph = generator(cluster_size);
    println!(
        "Generated in {:.1}ms — {} vertices, {} edges",
        t.elapsed().as_secs_f64() * 1000.0,
        graph.vertex_count(),
        graph.edge_count()
    );

    let t = Instant::now();
    let paths = ShortestPaths::compute(&graph);
    println!("Shortest paths:  {:>8.1}ms", t.elapsed().as_secs_f64() * 1000.0);

    let t = Instant::now();
    let tally = EdgeTally::from_paths(&paths);
    println!(
        "Edge tally:      {:>8.1}ms ({} edges on some path)",
        t.elapsed().as_secs_f64() * 1000.0,
        tally.len()
    );

    let expected = cluster_size * cluster_size;
    for (label, selection) in [
        ("one-shot", Selection::OneShot),
        ("progressive", Selection::Progressive),
    ] {
        let config = BisectConfig {
            selection,
            ..BisectConfig::default()
        };
        let t = Instant::now();
        let result = bisect(&graph, &config);
        let elapsed = t.elapsed().as_secs_f64() * 1000.0;
        match result {
            Ok(b) => println!(
                "Bisect {:<12} {:>8.1}ms — {} x {} = {} ({})",
                label,
                elapsed,
                b.sizes.0,
                b.sizes.1,
                b.product(),
                if b.product() as u64 == expected { "ok" } else { "MISMATCH" }
            ),
            Err(e) => println!("Bisect {:<12} {:>8.1}ms — failed: {}", label, elapsed, e),
        }
    }
    println!();
}

// ---------------------------------------------------------------------------
// Generators: two clusters of `n` vertices each, joined by exactly three
// edges, deterministic
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
}

fn left(i: u64) -> String {
    format!("l{:05}", i)
}

fn right(i: u64) -> String {
    format!("r{:05}", i)
}

/// Join the two clusters with three distinct bridge edges.
fn add_bridges(builder: &mut GraphBuilder, n: u64) {
    for i in 0..3 {
        let a = i * (n / 3);
        let b = (i * (n / 3) + n / 2) % n;
        builder.add_edge(&left(a), &right(b));
    }
}

/// Barbell: two dense clusters connected by three bridge edges.
///
/// Each cluster vertex links to ~10 random others in its own cluster, which
/// keeps every intra-cluster cut far wider than the bridge.
fn gen_barbell(n: u64) -> Graph {
    let mut builder = GraphBuilder::new();
    let mut rng = FastRng::new(99999);

    for side in [left as fn(u64) -> String, right] {
        // Chain first so each cluster is connected regardless of sampling
        for i in 1..n {
            builder.add_edge(&side(i - 1), &side(i));
        }
        for i in 0..n {
            for _ in 0..10 {
                let target = rng.next(n);
                if target != i {
                    builder.add_edge(&side(i), &side(target));
                }
            }
        }
    }

    add_bridges(&mut builder, n);
    builder.build()
}

/// Ring lattices: each vertex connected to its 3 nearest neighbors on each
/// side. Long shortest paths, many equal-length alternatives.
fn gen_rings(n: u64) -> Graph {
    let k = 3u64;
    let mut builder = GraphBuilder::new();

    for side in [left as fn(u64) -> String, right] {
        for i in 0..n {
            for j in 1..=k {
                builder.add_edge(&side(i), &side((i + j) % n));
            }
        }
    }

    add_bridges(&mut builder, n);
    builder.build()
}

/// Erdos-Renyi clusters: a random spanning tree plus ~4 random edges per
/// vertex. Baseline topology with no structure inside each side.
fn gen_random(n: u64) -> Graph {
    let mut builder = GraphBuilder::new();
    let mut rng = FastRng::new(54321);

    for side in [left as fn(u64) -> String, right] {
        for i in 1..n {
            builder.add_edge(&side(rng.next(i)), &side(i));
        }
        for _ in 0..n * 4 {
            let a = rng.next(n);
            let b = rng.next(n);
            if a != b {
                builder.add_edge(&side(a), &side(b));
            }
        }
    }

    add_bridges(&mut builder, n);
    builder.build()
}
