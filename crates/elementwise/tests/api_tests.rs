//! Tests for the public mapping API.
//!
//! These tests exercise the crate through its prelude only:
//! - Dynamic mapping with and without configuration
//! - Mapping into caller-supplied buffers
//! - Specialized mappers built through the factory and the builder
//! - Error classification for every failure category
//!
//! ## Test Organization
//!
//! 1. **Dynamic Mapping** - `apply`, `apply_with`, `apply_value`
//! 2. **In-Place Mapping** - `apply_into`, `apply_value_into`
//! 3. **Fallible Mapping** - `try_apply_with`, `try_apply_into`
//! 4. **Factory** - `factory`, `factory_with`
//! 5. **Builder** - duplicates, missing arity, deferred errors
//! 6. **Sharing** - concurrent use of one mapper

use approx::assert_relative_eq;
use serde_json::json;

use elementwise::prelude::*;

// ============================================================================
// Helper Functions
// ============================================================================

fn add(x: &[f64]) -> f64 {
    x[0] + x[1]
}

fn add1(x: &[f64]) -> f64 {
    x[0] + 1.0
}

fn sum(x: &[f64]) -> f64 {
    x.iter().sum()
}

fn reciprocal(x: &[f64]) -> Result<f64, &'static str> {
    if x[0] == 0.0 {
        Err("division by zero")
    } else {
        Ok(1.0 / x[0])
    }
}

// ============================================================================
// Dynamic Mapping Tests
// ============================================================================

/// Test a unary map allocates a float64 array by default.
#[test]
fn test_apply_unary() {
    let a: Vec<i8> = vec![1, 1, 1, 1];
    let out = apply(add1, &[&a]).unwrap();
    assert_eq!(out, TypedArray::Float64(vec![2.0; 4]));
}

/// Test a binary map over inputs of different kinds.
#[test]
fn test_apply_binary_mixed_kinds() {
    let a: Vec<i8> = vec![1, 1, 1, 1];
    let b: Vec<f32> = vec![2.0, 2.0, 2.0, 2.0];
    let out = apply(add, &[&a, &b]).unwrap();
    assert_eq!(out, TypedArray::Float64(vec![3.0; 4]));
}

/// Test any number of inputs is accepted per call.
#[test]
fn test_apply_variadic() {
    let a: Vec<u8> = vec![1, 2];
    let b: Vec<u16> = vec![10, 20];
    let c: Vec<i32> = vec![100, 200];
    let d: Vec<f64> = vec![0.5, 0.25];

    let out = apply(sum, &[&a, &b, &c, &d]).unwrap();
    assert_eq!(out, TypedArray::Float64(vec![111.5, 222.25]));
}

/// Test a requested output kind coerces the results.
#[test]
fn test_apply_with_dtype() {
    let a: Vec<f64> = vec![0.1, 1.7, 127.0];

    let out = apply_with(add1, &[&a], &ApplyOptions::new().dtype(Int8)).unwrap();
    assert_eq!(out, TypedArray::Int8(vec![1, 2, -128]));

    let out = apply_with(add1, &[&a], &ApplyOptions::new().dtype(Float32)).unwrap();
    match out {
        TypedArray::Float32(values) => assert_relative_eq!(values[0], 1.1f32),
        other => panic!("expected a float32 array, got {other}"),
    }
}

/// Test the generic kind stores results unchanged.
#[test]
fn test_apply_with_generic() {
    let a: Vec<f64> = vec![0.5, -2.25];
    let out = apply_with(add1, &[&a], &ApplyOptions::new().dtype(Generic)).unwrap();
    assert_eq!(out, TypedArray::Generic(vec![1.5, -1.25]));
    assert_eq!(out.to_string(), "Array[1.5, -1.25]");
}

/// Test empty inputs produce an empty output.
#[test]
fn test_apply_empty_inputs() {
    let a: Vec<i16> = vec![];
    let b: Vec<i16> = vec![];
    let out = apply(add, &[&a, &b]).unwrap();
    assert!(out.is_empty());
    assert_eq!(out.dtype(), Float64);
}

/// Test JSON configuration objects select the output kind.
#[test]
fn test_apply_value() {
    let a: Vec<f64> = vec![1.5, 254.6];

    let out = apply_value(add1, &[&a], &json!({ "dtype": "uint8_clamped" })).unwrap();
    assert_eq!(out, TypedArray::Uint8Clamped(vec![Clamped(2), Clamped(255)]));

    let out = apply_value(add1, &[&a], &json!({})).unwrap();
    assert_eq!(out.dtype(), Float64);

    let out = apply_value(add1, &[&a], &json!({ "dtype": "int16", "beep": 3 })).unwrap();
    assert_eq!(out, TypedArray::Int16(vec![2, 255]));
}

/// Test invalid configuration objects are type errors.
#[test]
fn test_apply_value_invalid_config() {
    let a: Vec<f64> = vec![1.0];

    for config in [json!("5"), json!(5), json!(true), json!(null), json!([])] {
        let err = apply_value(add1, &[&a], &config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type, "{config}");
    }

    let err = apply_value(add1, &[&a], &json!({ "dtype": 8 })).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);

    let err = apply_value(add1, &[&a], &json!({ "out": "yes" })).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);
}

/// Test unknown output kinds are configuration errors.
#[test]
fn test_unsupported_dtype() {
    let a: Vec<f64> = vec![1.0];

    for name in ["beep", "boop", "Float64", ""] {
        let err = apply_value(add1, &[&a], &json!({ "dtype": name })).unwrap_err();
        assert_eq!(err, ApplyError::UnsupportedDType(name.to_string()));
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    let err = apply_with(add1, &[&a], &ApplyOptions::new().dtype_name("beep")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

/// Test the allocating path rejects `out` configurations.
#[test]
fn test_apply_rejects_out_mode() {
    let a: Vec<f64> = vec![1.0];

    let err = apply_value(add1, &[&a], &json!({ "out": true })).unwrap_err();
    assert_eq!(err, ApplyError::OutputMode { expects_out: true });
    assert_eq!(err.kind(), ErrorKind::Type);
}

/// Test missing inputs and unequal lengths are arity errors.
#[test]
fn test_apply_shape_errors() {
    let err = apply(add1, &[]).unwrap_err();
    assert_eq!(err, ApplyError::NoInputs);
    assert_eq!(err.kind(), ErrorKind::Arity);

    let a: Vec<i8> = vec![1, 2, 3];
    let b: Vec<i8> = vec![1, 2];
    let err = apply(add, &[&a, &b]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Arity);
}

/// Test shape errors are reported before unknown output kinds.
#[test]
fn test_shape_errors_before_dtype() {
    let a: Vec<i8> = vec![1, 2, 3];
    let b: Vec<i8> = vec![1, 2];
    let err = apply_value(add, &[&a, &b], &json!({ "dtype": "beep" })).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Arity);
}

// ============================================================================
// In-Place Mapping Tests
// ============================================================================

/// Test mapping into a supplied buffer returns that buffer.
#[test]
fn test_apply_into_identity() {
    let a: Vec<u16> = vec![1, 2, 3];
    let mut out: Vec<u8> = vec![0; 3];
    let ptr = out.as_ptr();

    let returned = apply_into(|x| x[0] * 100.0, &mut out, &[&a]).unwrap();
    assert_eq!(returned.as_ptr(), ptr);
    assert_eq!(out, vec![100, 200, 44]);
}

/// Test the output kind of a supplied buffer governs coercion.
#[test]
fn test_apply_into_typed_array() {
    let a: Vec<f64> = vec![-1.5, 0.5, 300.0];
    let mut out = TypedArray::zeros(Uint8Clamped, 3);

    apply_into(|x| x[0], &mut out, &[&a]).unwrap();
    assert_eq!(
        out,
        TypedArray::Uint8Clamped(vec![Clamped(0), Clamped(0), Clamped(255)])
    );
}

/// Test mapping into a generic output.
#[test]
fn test_apply_into_generic() {
    let a: Vec<i32> = vec![1, 2];
    let mut out = TypedArray::zeros(Generic, 2);

    apply_into(|x| x[0] / 4.0, &mut out, &[&a]).unwrap();
    assert_eq!(out.as_f64_slice(), Some(&[0.25, 0.5][..]));
}

/// Test mapping into fixed arrays and mutable slices.
#[test]
fn test_apply_into_arrays_and_slices() {
    let a: [i8; 3] = [1, 2, 3];
    let b: &[u32] = &[10, 20, 30];

    let mut fixed = [0.0f32; 3];
    apply_into(add, &mut fixed, &[&a, &b]).unwrap();
    assert_eq!(fixed, [11.0, 22.0, 33.0]);

    let mut storage = vec![0i16; 3];
    let mut view: &mut [i16] = &mut storage;
    apply_into(add, &mut view, &[&a, &b]).unwrap();
    assert_eq!(storage, vec![11, 22, 33]);
}

/// Test the supplied output sets the required length.
#[test]
fn test_apply_into_length_mismatch() {
    let a: Vec<f64> = vec![1.0, 2.0];
    let mut out: Vec<f64> = vec![7.0; 3];

    let err = apply_into(add1, &mut out, &[&a]).unwrap_err();
    assert_eq!(
        err,
        ApplyError::MismatchedLengths {
            index: 0,
            expected: 3,
            got: 2
        }
    );
    assert_eq!(out, vec![7.0; 3]);
}

/// Test JSON configuration objects on the in-place path.
#[test]
fn test_apply_value_into() {
    let a: Vec<f64> = vec![1.5, 2.5];
    let mut out: Vec<i16> = vec![0; 2];
    let ptr = out.as_ptr();

    let returned = apply_value_into(
        add1,
        &mut out,
        &[&a],
        &json!({ "out": true, "dtype": "beep" }),
    )
    .unwrap();
    assert_eq!(returned.as_ptr(), ptr);
    assert_eq!(out, vec![2, 3]);
}

/// Test the in-place JSON path requires `out` and a valid object.
#[test]
fn test_apply_value_into_errors() {
    let a: Vec<f64> = vec![1.0];
    let mut out: Vec<f64> = vec![5.0];

    let err = apply_value_into(add1, &mut out, &[&a], &json!({})).unwrap_err();
    assert_eq!(err, ApplyError::OutputMode { expects_out: false });

    let err = apply_value_into(add1, &mut out, &[&a], &json!({ "out": false })).unwrap_err();
    assert_eq!(err, ApplyError::OutputMode { expects_out: false });

    let err = apply_value_into(add1, &mut out, &[&a], &json!({ "out": true, "dtype": 3 }))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);

    let err = apply_value_into(add1, &mut out, &[&a], &json!([true])).unwrap_err();
    assert!(matches!(err, ApplyError::InvalidOptions(_)));

    assert_eq!(out, vec![5.0]);
}

// ============================================================================
// Fallible Mapping Tests
// ============================================================================

/// Test fallible functions that succeed everywhere.
#[test]
fn test_try_apply_with_success() {
    let a: Vec<f64> = vec![2.0, 4.0];
    let out = try_apply_with(reciprocal, &[&a], &ApplyOptions::new()).unwrap();
    assert_eq!(out, TypedArray::Float64(vec![0.5, 0.25]));
}

/// Test a failing function aborts with the failing index.
#[test]
fn test_try_apply_with_failure() {
    let a: Vec<f64> = vec![2.0, 0.0, 4.0];
    let err = try_apply_with(reciprocal, &[&a], &ApplyOptions::new()).unwrap_err();

    assert_eq!(
        err,
        ApplyError::Callback {
            index: 1,
            message: "division by zero".to_string()
        }
    );
    assert_eq!(err.kind(), ErrorKind::Callback);
    assert!(err.to_string().contains("index 1"));
}

/// Test a failing function leaves earlier results in a supplied output.
#[test]
fn test_try_apply_into_partial_output() {
    let a: Vec<f64> = vec![2.0, 4.0, 0.0, 8.0];
    let mut out: Vec<f64> = vec![-1.0; 4];

    let err = try_apply_into(reciprocal, &mut out, &[&a]).unwrap_err();
    assert!(matches!(err, ApplyError::Callback { index: 2, .. }));
    assert_eq!(out, vec![0.5, 0.25, -1.0, -1.0]);
}

// ============================================================================
// Factory Tests
// ============================================================================

/// Test a factory mapper takes its function per call.
#[test]
fn test_factory_unbound() {
    let mapper = factory(2, &ApplyOptions::new()).unwrap();
    assert_eq!(mapper.arity(), 2);
    assert_eq!(mapper.mode(), OutputMode::Allocate(Float64));

    let a: Vec<u16> = vec![1, 1, 1, 1];
    let b: Vec<u32> = vec![2, 2, 2, 2];
    let out = mapper.apply(add, &[&a, &b]).unwrap();
    assert_eq!(out, TypedArray::Float64(vec![3.0; 4]));

    let out = mapper.apply(|x| x[0] * x[1], &[&b, &b]).unwrap();
    assert_eq!(out, TypedArray::Float64(vec![4.0; 4]));
}

/// Test a factory mapper with a bound function.
#[test]
fn test_factory_bound() {
    let mapper = factory_with(add, 2, &ApplyOptions::new().dtype(Int16)).unwrap();

    let a: Vec<i8> = vec![100, -100];
    let b: Vec<i8> = vec![100, -100];
    let out = mapper.apply(&[&a, &b]).unwrap();
    assert_eq!(out, TypedArray::Int16(vec![200, -200]));
}

/// Test calls must supply exactly `arity` inputs.
#[test]
fn test_factory_arity_mismatch() {
    let mapper = factory(2, &ApplyOptions::new()).unwrap();
    let a: Vec<f64> = vec![1.0];

    let err = mapper.apply(add1, &[&a]).unwrap_err();
    assert_eq!(err, ApplyError::ArityMismatch { expected: 2, got: 1 });
    assert_eq!(err.kind(), ErrorKind::Arity);

    let err = mapper.apply(sum, &[&a, &a, &a]).unwrap_err();
    assert_eq!(err, ApplyError::ArityMismatch { expected: 2, got: 3 });
}

/// Test an invalid arity is rejected when building.
#[test]
fn test_factory_invalid_arity() {
    let err = factory(0, &ApplyOptions::new()).unwrap_err();
    assert_eq!(err, ApplyError::InvalidArity(0));
    assert_eq!(err.kind(), ErrorKind::Type);
}

/// Test unknown output kinds are rejected when building.
#[test]
fn test_factory_resolves_dtype_at_build() {
    let err = factory(1, &ApplyOptions::new().dtype_name("beep")).unwrap_err();
    assert_eq!(err, ApplyError::UnsupportedDType("beep".to_string()));

    let mapper = factory(1, &ApplyOptions::new().dtype_name("uint32")).unwrap();
    assert_eq!(mapper.mode(), OutputMode::Allocate(Uint32));
}

/// Test `out` mode ignores the requested kind.
#[test]
fn test_factory_out_ignores_dtype() {
    let options = ApplyOptions::new().dtype_name("beep").out(true);
    let mapper = factory(1, &options).unwrap();
    assert_eq!(mapper.mode(), OutputMode::Provided);

    let a: Vec<f64> = vec![1.5, 2.5];
    let mut out: Vec<i32> = vec![0; 2];
    let returned = mapper.apply_into(add1, &mut out, &[&a]).unwrap();
    assert_eq!(*returned, vec![2, 3]);
}

/// Test calling the shape that does not match the mode fails.
#[test]
fn test_factory_output_mode_mismatch() {
    let a: Vec<f64> = vec![1.0];

    let allocating = factory(1, &ApplyOptions::new()).unwrap();
    let mut out: Vec<f64> = vec![0.0];
    let err = allocating.apply_into(add1, &mut out, &[&a]).unwrap_err();
    assert_eq!(err, ApplyError::OutputMode { expects_out: false });
    assert_eq!(out, vec![0.0]);

    let in_place = factory(1, &ApplyOptions::new().out(true)).unwrap();
    let err = in_place.apply(add1, &[&a]).unwrap_err();
    assert_eq!(err, ApplyError::OutputMode { expects_out: true });
}

/// Test a mapper can be reused across calls.
#[test]
fn test_factory_reuse() {
    let mapper = factory_with(add1, 1, &ApplyOptions::new().dtype(Uint8)).unwrap();

    let a: Vec<f64> = vec![1.0, 2.0];
    let b: Vec<f64> = vec![254.0, 255.0, 256.0];
    assert_eq!(mapper.apply(&[&a]).unwrap(), TypedArray::Uint8(vec![2, 3]));
    assert_eq!(
        mapper.apply(&[&b]).unwrap(),
        TypedArray::Uint8(vec![255, 0, 1])
    );
}

// ============================================================================
// Builder Tests
// ============================================================================

/// Test the builder produces the same mapper as the factory.
#[test]
fn test_builder() {
    let mapper = Mapper::new().function(add).arity(2).dtype(Int32).build().unwrap();

    let a: Vec<u16> = vec![1, 1, 1, 1];
    let b: Vec<u32> = vec![2, 2, 2, 2];
    assert_eq!(
        mapper.apply(&[&a, &b]).unwrap(),
        TypedArray::Int32(vec![3; 4])
    );
}

/// Test arity is required.
#[test]
fn test_builder_missing_arity() {
    let err = Mapper::new().dtype(Int8).build().unwrap_err();
    assert_eq!(err, ApplyError::MissingParameter { parameter: "arity" });
}

/// Test parameters may only be set once.
#[test]
fn test_builder_duplicate_parameters() {
    let err = Mapper::new().arity(1).arity(2).build().unwrap_err();
    assert_eq!(err, ApplyError::DuplicateParameter { parameter: "arity" });

    let err = Mapper::new()
        .arity(1)
        .dtype(Int8)
        .dtype_name("int16")
        .build()
        .unwrap_err();
    assert_eq!(err, ApplyError::DuplicateParameter { parameter: "dtype" });

    let err = Mapper::new().arity(1).out(true).out(false).build().unwrap_err();
    assert_eq!(err, ApplyError::DuplicateParameter { parameter: "out" });

    let err = Mapper::new()
        .arity(1)
        .dtype(Int8)
        .options(ApplyOptions::new().dtype(Int16))
        .build()
        .unwrap_err();
    assert_eq!(err, ApplyError::DuplicateParameter { parameter: "dtype" });

    let err = Mapper::new()
        .arity(1)
        .out(true)
        .options(ApplyOptions::new())
        .build()
        .unwrap_err();
    assert_eq!(err, ApplyError::DuplicateParameter { parameter: "out" });

    let err = Mapper::new()
        .arity(1)
        .dtype(Int8)
        .options_value(&json!({ "dtype": "int16" }))
        .build()
        .unwrap_err();
    assert_eq!(err, ApplyError::DuplicateParameter { parameter: "dtype" });
}

/// Test `options` keeps fields it does not carry.
#[test]
fn test_builder_options_merge() {
    let mapper = Mapper::new()
        .arity(1)
        .dtype(Int8)
        .options(ApplyOptions::new())
        .build()
        .unwrap();
    assert_eq!(mapper.mode(), OutputMode::Allocate(Int8));

    let mapper = Mapper::new()
        .arity(1)
        .options(ApplyOptions::new().out(true))
        .dtype_name("beep")
        .build()
        .unwrap();
    assert_eq!(mapper.mode(), OutputMode::Provided);

    let mapper = Mapper::new()
        .arity(1)
        .dtype(Uint16)
        .options_value(&json!({ "out": false }))
        .build()
        .unwrap();
    assert_eq!(mapper.mode(), OutputMode::Allocate(Uint16));
}

/// Test JSON configuration errors surface from `build`.
#[test]
fn test_builder_options_value() {
    let mapper = Mapper::new()
        .arity(1)
        .options_value(&json!({ "dtype": "float32" }))
        .build()
        .unwrap();
    assert_eq!(mapper.mode(), OutputMode::Allocate(Float32));

    let err = Mapper::new()
        .arity(1)
        .options_value(&json!([1, 2]))
        .build()
        .unwrap_err();
    assert!(matches!(err, ApplyError::InvalidOptions(_)));
}

// ============================================================================
// Sharing Tests
// ============================================================================

/// Test one mapper serves several threads at once.
#[test]
fn test_mapper_shared_across_threads() {
    let mapper = factory_with(sum, 2, &ApplyOptions::new()).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let mapper = &mapper;
                scope.spawn(move || {
                    let a: Vec<f64> = vec![t as f64; 8];
                    let b: Vec<f64> = vec![1.0; 8];
                    mapper.apply(&[&a, &b]).unwrap()
                })
            })
            .collect();

        for (t, handle) in handles.into_iter().enumerate() {
            let out = handle.join().unwrap();
            assert_eq!(out, TypedArray::Float64(vec![t as f64 + 1.0; 8]));
        }
    });
}
