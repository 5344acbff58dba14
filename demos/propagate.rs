use simple_logger::SimpleLogger;

use gopath::{parser, pipeline, Ontology, PipelineConfig};

/// Propagates raw predictions along the Gene Ontology and writes the report
///
/// Usage: `propagate <go-basic.obo> <predictions.tsv> <report.tsv>`
///
/// Set `RUST_LOG=debug` to see details of each step.
fn main() {
    SimpleLogger::new().env().init().unwrap();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 4 {
        println!("Usage: propagate <obo file> <prediction tsv> <output tsv>");
        return;
    }

    let ontology = Ontology::from_obo_file(&args[1]).unwrap();
    println!("{ontology:?}");

    let config = PipelineConfig::default();
    let predictions = parser::predictions::read_file(&args[2]).unwrap();
    let table = pipeline::collect_predictions(&ontology, predictions, &config).unwrap();
    println!("Collected predictions for {} proteins", table.len());

    let propagation = table.propagate(&ontology);
    println!("Propagated to {} ancestor terms", propagation.len());

    match pipeline::write_report_file(&table, &config, &args[3]) {
        Ok(()) => println!("Saved report to {}", args[3]),
        Err(err) => println!("Error: {err}"),
    }
}
