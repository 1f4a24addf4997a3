use planarity::graph::{load_from_file, read_graph, IndexBase, InputFormat};
use planarity::oracle::{OracleConfig, PlanarityOracle};
use planarity::survey::{run_survey, SurveyConfig};

fn main() {
    let mut oracle_cfg = OracleConfig::default();
    let mut input: Option<String> = None;
    let mut base = IndexBase::Zero;
    let mut matrix = false;
    let mut show_matrix = false;
    let mut report = false;
    let mut validate_only = false;
    let mut survey: Option<(usize, f64, usize)> = None;
    let mut seed: Option<u64> = None;

    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--input" | "-i" => {
                let v = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                input = Some(v.clone());
                i += 2;
            }
            "--one-based" => {
                base = IndexBase::One;
                i += 1;
            }
            "--matrix" => {
                matrix = true;
                i += 1;
            }
            "--show-matrix" => {
                show_matrix = true;
                i += 1;
            }
            "--no-recheck" => {
                oracle_cfg.recheck_after_reduction = false;
                i += 1;
            }
            "--report" => {
                report = true;
                i += 1;
            }
            "--test" | "--validate" => {
                validate_only = true;
                i += 1;
            }
            "--survey" => {
                let n = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                let p = args.get(i + 2).unwrap_or_else(|| usage_and_exit(2));
                let count = args.get(i + 3).unwrap_or_else(|| usage_and_exit(2));
                survey = Some((
                    n.parse().unwrap_or_else(|_| usage_and_exit(2)),
                    p.parse().unwrap_or_else(|_| usage_and_exit(2)),
                    count.parse().unwrap_or_else(|_| usage_and_exit(2)),
                ));
                i += 4;
            }
            "--seed" => {
                let v = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                seed = Some(v.parse().unwrap_or_else(|_| usage_and_exit(2)));
                i += 2;
            }
            "--help" | "-h" => usage_and_exit(0),
            _ => usage_and_exit(2),
        }
    }

    if validate_only {
        match planarity::validate::validate_known_graphs() {
            Ok(()) => {
                println!("Validation OK: bundled graphs are classified correctly.");
                return;
            }
            Err(e) => {
                eprintln!("Validation FAILED: {e}");
                std::process::exit(1);
            }
        }
    }

    if let Some((order, edge_probability, samples)) = survey {
        let cfg = SurveyConfig {
            order,
            edge_probability,
            samples,
            seed,
            oracle: oracle_cfg,
        };
        println!("--------------------------------------------------");
        println!("Planarity survey: G(n={order}, p={edge_probability:.3}), {samples} samples");
        println!(
            "Threads: {} | recheck after reduction: {}",
            rayon::current_num_threads(),
            oracle_cfg.recheck_after_reduction
        );
        println!("--------------------------------------------------");
        let summary = match run_survey(&cfg) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("--survey: {e}");
                std::process::exit(2);
            }
        };
        println!("seed:               {}", summary.seed);
        println!("{summary}");
        return;
    }

    let format = if matrix {
        InputFormat::Matrix
    } else {
        InputFormat::EdgeList(base)
    };
    let parsed = match &input {
        Some(path) => load_from_file(path, format),
        None => read_graph(std::io::stdin().lock(), format),
    };
    let graph = match parsed {
        Ok(g) => g,
        Err(e) => {
            eprintln!(
                "Failed to read graph from {}: {e}",
                input.as_deref().unwrap_or("stdin")
            );
            std::process::exit(1);
        }
    };

    if show_matrix {
        println!("Adjacency matrix ({} vertices, {} edges):", graph.order(), graph.edge_count());
        print!("{graph}");
    }

    let result = PlanarityOracle::with_config(oracle_cfg).check(&graph);
    if report {
        println!("{result}");
    } else {
        println!("The graph is {}.", result.verdict);
        if let Some(w) = result.verdict.witness() {
            println!("Found {w}");
        } else if let Some(m) = &result.minor {
            println!("Found {m}");
        }
    }
}

fn usage_and_exit(code: i32) -> ! {
    eprintln!(
        "Usage:\n  planarity [--input FILE] [--one-based | --matrix] [--show-matrix] [--no-recheck] [--report]\n  planarity --survey N P COUNT [--seed SEED] [--no-recheck]\n  planarity --validate\n\nOptions:\n  --input FILE             Read the graph from FILE instead of stdin\n  --one-based              Edge-list vertices are numbered from 1\n  --matrix                 Input is a 0/1 adjacency matrix\n  --show-matrix            Print the adjacency matrix before the verdict\n  --no-recheck             Skip the K5/K3,3 search after reduction\n  --report                 Print stage, reduction and witness diagnostics\n  --survey N P COUNT       Classify COUNT random G(N, P) graphs in parallel\n  --seed SEED              Deterministic base seed for --survey (optional)\n  --test/--validate        Validate bundled graphs (fast, deterministic)\n\nEdge-list input: vertex count V, edge count E, then E pairs `u v`; `#` starts a comment.\n"
    );
    std::process::exit(code)
}
