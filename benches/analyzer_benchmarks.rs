// japy-sema - Semantic analysis pass for the Japy language
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Performance benchmarks for the Japy semantic analyzer.
//!
//! Run with: cargo bench
//!
//! Results are saved to target/criterion/ with HTML reports.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use japy_sema::analyzer::{ReturnTypeRule, ScopeRegistry};
use japy_sema::ast::{Assignment, ClassDecl, Conditional, Expr, FieldDecl, MethodDecl, VarDef};
use japy_sema::report::format_report;
use japy_sema::{AnalyzerOptions, Node, NodeKind, Position, Program, Span};

// ============================================================================
// Benchmark Inputs
// ============================================================================

/// Build a program with `classes` classes of `methods` methods each.
fn synthetic_program(classes: usize, methods: usize) -> Program {
    let mut program = Program::new("bench.japy");
    let mut line = 1;
    for c in 0..classes {
        let class_line = line;
        let mut class = Node::new(
            NodeKind::ClassDecl(ClassDecl::new(format!("C{c}"))),
            Span::default(),
        );
        for f in 0..4 {
            line += 1;
            class = class.with_child(Node::new(
                NodeKind::FieldDecl(FieldDecl::new(format!("f{f}"), "int")),
                Span::at(line, 4),
            ));
        }
        for m in 0..methods {
            line += 1;
            let start = line;
            let decl = MethodDecl::new(format!("m{m}"), "MethodReturnType")
                .with_param("a", "int")
                .with_param("b", "string");
            let xs = Node::new(
                NodeKind::VarDef(VarDef::new("xs").with_array_length(8)),
                Span::at(start + 1, 8),
            );
            let store = Node::new(
                NodeKind::Assignment(Assignment::indexed(
                    "xs",
                    Expr::new("3", Position::new(start + 3, 15)),
                    Expr::new("1", Position::new(start + 3, 20)),
                )),
                Span::at(start + 3, 12),
            );
            let cond = Node::new(
                NodeKind::ClosedConditional(Conditional::with_else(start + 4)),
                Span::lines(start + 2, 8, start + 6),
            )
            .with_child(store)
            .with_child(Node::new(
                NodeKind::VarDef(VarDef::new("y")),
                Span::at(start + 5, 12),
            ));
            let lp = Node::new(NodeKind::ClosedLoop, Span::lines(start + 7, 8, start + 9))
                .with_child(Node::new(
                    NodeKind::VarDef(VarDef::new("i")),
                    Span::at(start + 8, 12),
                ));
            class = class.with_child(
                Node::new(NodeKind::MethodDecl(decl), Span::lines(start, 4, start + 10))
                    .with_child(xs)
                    .with_child(cond)
                    .with_child(lp),
            );
            line = start + 10;
        }
        line += 1;
        class.span = Span::lines(class_line, 0, line);
        program.add_item(class);
    }
    program
}

fn options() -> AnalyzerOptions {
    AnalyzerOptions::new().with_return_type_rule(ReturnTypeRule::Disabled)
}

// ============================================================================
// Analyzer Benchmarks
// ============================================================================

fn bench_analyzer(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyzer");

    for (name, classes, methods) in [("small", 2, 4), ("medium", 10, 20), ("large", 50, 40)] {
        let program = synthetic_program(classes, methods);
        let nodes: usize = program.items.iter().map(Node::node_count).sum();
        group.throughput(Throughput::Elements(nodes as u64));
        group.bench_with_input(BenchmarkId::new("analyze", name), &program, |b, program| {
            b.iter(|| japy_sema::analyze_with_options(black_box(program), options()))
        });
    }

    group.finish();
}

// ============================================================================
// Report Benchmarks
// ============================================================================

fn bench_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("report");

    for (name, classes, methods) in [("small", 2, 4), ("large", 50, 40)] {
        let registry: ScopeRegistry =
            match japy_sema::analyze_with_options(&synthetic_program(classes, methods), options()) {
                Ok(analysis) => analysis.registry,
                Err(e) => panic!("Failed to analyze benchmark input: {}", e),
            };
        group.bench_with_input(BenchmarkId::new("format", name), &registry, |b, registry| {
            b.iter(|| format_report("bench.japy", black_box(registry)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_analyzer, bench_report);
criterion_main!(benches);
