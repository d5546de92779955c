// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use dryad::layout::{compute_layout, LayoutConfig};
use dryad::scene::{project, MemoryHost, PushOutcome, ReconcileConfig, Reconciler};

mod fixtures;
mod profiler;

// Benchmark identity (keep stable):
// - Group names in this file: `reconcile.push`, `reconcile.scene_change`
// - Case IDs (the string after the `/`) must remain stable across refactors so
//   results stay comparable over time (e.g. `small`, `wide`).
fn benches_reconcile(c: &mut Criterion) {
    let config = LayoutConfig::default();

    {
        let mut group = c.benchmark_group("reconcile.push");

        for (case_id, state) in [
            ("small", fixtures::balanced_forest(1, 3, 2)),
            ("wide", fixtures::balanced_forest(4, 6, 3)),
        ] {
            let positions = compute_layout(state.root_ids(), state.nodes(), &config);
            let descriptors = project(state.root_ids(), state.nodes(), &positions);
            let mut host = MemoryHost::new();
            let mut reconciler = Reconciler::new(ReconcileConfig::default());

            group.throughput(Throughput::Elements(descriptors.len() as u64));
            group.bench_function(case_id, move |b| {
                b.iter(|| {
                    let outcome = reconciler.push(
                        &mut host,
                        black_box(&state),
                        black_box(&positions),
                        black_box(&descriptors),
                        true,
                    );
                    reconciler.tick(&mut host, &state);
                    let written = match outcome {
                        PushOutcome::Written { elements, .. } => elements,
                        PushOutcome::Skipped => 0,
                    };
                    black_box(written)
                })
            });
        }

        group.finish();
    }

    {
        let mut group = c.benchmark_group("reconcile.scene_change");

        for (case_id, mut store) in [
            ("small", fixtures::balanced_store(1, 3, 2)),
            ("wide", fixtures::balanced_store(4, 6, 3)),
        ] {
            let state = store.state().clone();
            let positions = compute_layout(state.root_ids(), state.nodes(), &config);
            let descriptors = project(state.root_ids(), state.nodes(), &positions);
            let mut host = MemoryHost::new();
            let mut reconciler = Reconciler::new(ReconcileConfig::default());
            reconciler.push(&mut host, &state, &positions, &descriptors, true);
            reconciler.tick(&mut host, &state);
            let (elements, app_state) = host.take_notification().unwrap_or_default();

            group.throughput(Throughput::Elements(elements.len() as u64));
            group.bench_function(case_id, move |b| {
                b.iter(|| {
                    let report = reconciler.on_scene_change(
                        &mut store,
                        black_box(&elements),
                        black_box(&app_state),
                    );
                    black_box(report.is_empty())
                })
            });
        }

        group.finish();
    }
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_reconcile
}
criterion_main!(benches);
