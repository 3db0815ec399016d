//! Benchmarks for header extraction.
//!
//! Run with: `cargo bench --bench extraction`
//!
//! Synthetic headers are always benchmarked. To include a real engine tree,
//! point `UE_SOURCE_DIR` at an `Engine/Source` directory:
//! ```bash
//! UE_SOURCE_DIR=/opt/UE5/Engine/Source cargo bench --bench extraction
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::path::PathBuf;
use std::time::Duration;

use ue_api_docs::extract::split_parameters;
use ue_api_docs::{HeaderExtractor, HeaderWalker, ModuleApiParser};

/// A header with `blocks` copies of a class, its methods, an enum and a struct
fn synthetic_header(blocks: usize) -> String {
    let mut content = String::from("#pragma once\n\n#include \"CoreMinimal.h\"\n\n");
    for i in 0..blocks {
        content.push_str(&format!(
            r#"UENUM()
enum class EState{i}
{{
    Idle,
    Running = 2,
    Stopped = Running << 1
}};

USTRUCT(BlueprintType)
struct ENGINE_API FPayload{i} : public FTableRowBase
{{
    GENERATED_BODY()
}};

class ENGINE_API AThing{i} : public AActor, public IInterface{i}
{{
    GENERATED_BODY()
public:
    static AThing{i}* Create(UWorld* World, const FTransform& Transform);
    virtual void Tick(float DeltaSeconds);
    TMap<FName, TArray<int32>> Lookup(const TMap<FName, int32>& Input, int32 Count = 0) const;
    FString Describe(const FString& Prefix = TEXT("x"));
}};

"#
        ));
    }
    content
}

fn bench_extract_synthetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_synthetic");
    let extractor = HeaderExtractor::new();

    for blocks in [10usize, 100, 1000] {
        let header = synthetic_header(blocks);
        group.throughput(Throughput::Bytes(header.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(blocks), &header, |b, header| {
            b.iter(|| {
                let set = extractor.extract_all(header, "Engine/Source/Runtime/Engine/Public/Thing.h");
                black_box(set.len())
            });
        });
    }

    group.finish();
}

fn bench_split_parameters(c: &mut Criterion) {
    let params = "const TMap<FName, TArray<int32>>& Lookup, int32 Count, float Scale = 1.0f, \
                  TFunction<void(int32, bool)> Callback, const FString& Name";
    c.bench_function("split_parameters", |b| {
        b.iter(|| black_box(split_parameters(black_box(params)).len()));
    });
}

/// Walks and extracts a real engine tree when `UE_SOURCE_DIR` is set
fn bench_engine_tree(c: &mut Criterion) {
    let Some(source_dir) = std::env::var_os("UE_SOURCE_DIR").map(PathBuf::from) else {
        eprintln!("Skipping engine tree benchmark - UE_SOURCE_DIR not set.");
        return;
    };

    let mut group = c.benchmark_group("engine_tree");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(30));

    for module in ["Runtime/Core/Public", "Runtime/Engine/Public"] {
        let public_dir = source_dir.join(module);
        if !public_dir.is_dir() {
            eprintln!("Skipping {} - not found at {}", module, public_dir.display());
            continue;
        }

        let headers = HeaderWalker::new()
            .walk(&public_dir)
            .map(|files| files.len())
            .unwrap_or(0);
        group.throughput(Throughput::Elements(headers as u64));
        group.bench_with_input(BenchmarkId::new("module", module), &public_dir, |b, dir| {
            b.iter(|| {
                let parsed = ModuleApiParser::new(dir).parse().expect("Failed to parse");
                black_box(parsed.declarations.len())
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_extract_synthetic,
    bench_split_parameters,
    bench_engine_tree
);
criterion_main!(benches);
