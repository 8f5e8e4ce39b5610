//! Tracer callback ordering and counting.

use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use flatframe_common::utils::strings::decode_hex;
use flatframe_vm::core::{
    harness::FrameBuilder,
    layout::{FrameMemory, FrameState, OperationResult, TracerCallbacks},
};

mod counting {
    use super::*;

    static PRE_CALLS: AtomicUsize = AtomicUsize::new(0);
    static POST_CALLS: AtomicUsize = AtomicUsize::new(0);
    static THIRD_OP_GAS: AtomicI64 = AtomicI64::new(-1);

    extern "C" fn pre(_frame: *mut FrameMemory) {
        PRE_CALLS.fetch_add(1, Ordering::SeqCst);
    }

    extern "C" fn post(_frame: *mut FrameMemory, result: *const OperationResult) {
        let calls = POST_CALLS.fetch_add(1, Ordering::SeqCst) + 1;
        // SAFETY: the interpreter passes a live OperationResult for the upcall
        let result = unsafe { &*result };
        if calls == 3 {
            THIRD_OP_GAS.store(result.gas_cost, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_pre_and_post_fire_once_per_opcode() {
        // PUSH1 5, PUSH1 3, ADD, STOP: four dispatched opcodes
        let code = decode_hex("600560030100").expect("invalid bytecode");
        let mut host =
            FrameBuilder::new().code(&code).gas(1_000).build().expect("failed to build frame");

        let tracer = TracerCallbacks { pre: Some(pre), post: Some(post) };
        unsafe {
            flatframe_vm::core::vm::execute_message(host.frame_ptr(), &tracer);
        }

        assert_eq!(host.frame().state, FrameState::CompletedSuccess as u32);
        assert_eq!(PRE_CALLS.load(Ordering::SeqCst), 4);
        assert_eq!(POST_CALLS.load(Ordering::SeqCst), 4);
        // the third dispatched opcode is the ADD
        assert_eq!(THIRD_OP_GAS.load(Ordering::SeqCst), 3);
    }
}

mod gas_observation {
    use super::*;

    static PRE_GAS: AtomicI64 = AtomicI64::new(-1);
    static POST_GAS: AtomicI64 = AtomicI64::new(-1);
    static CALLS: AtomicUsize = AtomicUsize::new(0);

    extern "C" fn pre(frame: *mut FrameMemory) {
        if CALLS.load(Ordering::SeqCst) == 0 {
            // SAFETY: read-only peek at the live control block
            let frame = unsafe { &*frame };
            PRE_GAS.store(frame.gas_remaining, Ordering::SeqCst);
        }
    }

    extern "C" fn post(frame: *mut FrameMemory, _result: *const OperationResult) {
        if CALLS.fetch_add(1, Ordering::SeqCst) == 0 {
            // SAFETY: as above
            let frame = unsafe { &*frame };
            POST_GAS.store(frame.gas_remaining, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_pre_sees_gas_before_charge_and_post_after() {
        let code = decode_hex("600500").expect("invalid bytecode");
        let mut host =
            FrameBuilder::new().code(&code).gas(500).build().expect("failed to build frame");

        let tracer = TracerCallbacks { pre: Some(pre), post: Some(post) };
        host.execute_traced(&tracer);

        assert_eq!(PRE_GAS.load(Ordering::SeqCst), 500);
        assert_eq!(POST_GAS.load(Ordering::SeqCst), 497);
    }
}

mod faulting {
    use super::*;

    static PRE_CALLS: AtomicUsize = AtomicUsize::new(0);
    static POST_CALLS: AtomicUsize = AtomicUsize::new(0);

    extern "C" fn pre(_frame: *mut FrameMemory) {
        PRE_CALLS.fetch_add(1, Ordering::SeqCst);
    }

    extern "C" fn post(_frame: *mut FrameMemory, _result: *const OperationResult) {
        POST_CALLS.fetch_add(1, Ordering::SeqCst);
    }

    #[test]
    fn test_faulting_op_gets_no_post_trace() {
        // ADD on an empty stack faults immediately
        let code = decode_hex("01").expect("invalid bytecode");
        let mut host =
            FrameBuilder::new().code(&code).gas(100).build().expect("failed to build frame");

        let tracer = TracerCallbacks { pre: Some(pre), post: Some(post) };
        host.execute_traced(&tracer);

        assert_eq!(host.frame().state, FrameState::ExceptionalHalt as u32);
        assert_eq!(PRE_CALLS.load(Ordering::SeqCst), 1);
        assert_eq!(POST_CALLS.load(Ordering::SeqCst), 0);
    }
}

mod partial_vtable {
    use super::*;

    static PRE_CALLS: AtomicUsize = AtomicUsize::new(0);

    extern "C" fn pre(_frame: *mut FrameMemory) {
        PRE_CALLS.fetch_add(1, Ordering::SeqCst);
    }

    #[test]
    fn test_null_post_pointer_is_tolerated() {
        let code = decode_hex("600500").expect("invalid bytecode");
        let mut host =
            FrameBuilder::new().code(&code).gas(100).build().expect("failed to build frame");

        let tracer = TracerCallbacks { pre: Some(pre), post: None };
        host.execute_traced(&tracer);

        assert_eq!(host.frame().state, FrameState::CompletedSuccess as u32);
        assert_eq!(PRE_CALLS.load(Ordering::SeqCst), 2);
    }
}
