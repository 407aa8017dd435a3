use std::error::Error;
use std::io::stdout;

use prop_sat::brute_force::BruteForce;
use prop_sat::independent_set::IndependentSet;
use prop_sat::minimal_unsat::is_minimally_unsatisfiable;
use prop_sat::ps_graph::convert_nnf_to_cnf;
use prop_sat::two_sat::TwoSat;
use prop_sat::{Clause, Cnf, Formula, Literal, Nnf, NnfItem, SatChecker};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let mut stdout = stdout();
    let checkers: [&dyn SatChecker; 3] = [&BruteForce, &TwoSat, &IndependentSet];

    println!("\nExample 1: A satisfiable CNF");

    let cnf = Cnf::parse("(x OR y) AND (NOTx OR NOTy)")?;
    println!("{cnf}");
    BruteForce.print_truth_table(&cnf.clone().into(), &mut stdout)?;
    for checker in checkers {
        println!("Is satisfiable ({})?: {}", checker.name(), cnf.is_sat(checker)?);
    }
    for model in BruteForce.get_model(&cnf) {
        println!("Model: {model:?}");
    }

    println!("\nExample 2: A contradiction");

    let cnf = Cnf::parse("x AND (NOTx OR y) AND NOTy")?;
    println!("{cnf}");
    for checker in checkers {
        println!("Is satisfiable ({})?: {}", checker.name(), cnf.is_sat(checker)?);
    }
    println!(
        "Is minimally unsatisfiable?: {}",
        is_minimally_unsatisfiable(&cnf, None)?
    );

    println!("\nExample 3: Entailment");

    let alpha: Formula = Cnf::parse("x AND (NOTx OR y)")?.into();
    let beta: Formula = Literal::parse("y")?.into();
    for checker in checkers {
        let entails = checker.entails(&alpha, &beta)?;
        println!("{alpha} entails {beta} ({})?: {entails}", checker.name());
    }
    let beta: Formula = Clause::parse("y OR z")?.into();
    println!("{alpha} entails {beta}?: {}", TwoSat.entails(&alpha, &beta)?);

    println!("\nExample 4: NNF to CNF");

    let literal = |name: &str| Literal::parse(name).map(NnfItem::from);
    let b_and_not_c = Nnf::and(vec![literal("b")?, literal("NOTc")?])?;
    let d_and_e = Nnf::and(vec![literal("d")?, literal("e")?])?;
    let either = Nnf::or(vec![b_and_not_c.into(), d_and_e.into()])?;
    let nnf = Nnf::and(vec![literal("NOTa")?, either.into()])?;
    println!("{nnf}");
    let qcnf = convert_nnf_to_cnf(&nnf, "z")?;
    println!("...converts to...");
    println!("{qcnf}");
    println!("Is satisfiable (2-SAT)?: {}", qcnf.cnf().is_sat(&TwoSat)?);
    Ok(())
}
