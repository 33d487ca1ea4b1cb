mod common;

use std::collections::VecDeque;

use xen_runtime::{Clock, LineReader, RngAlgorithm, Value};

use common::{call, quiet_runtime};

struct MockClock;

impl Clock for MockClock {
    fn unix_secs(&self) -> f64 {
        1234567890.0
    }

    fn mono_secs(&self) -> f64 {
        0.042
    }
}

struct MaxRng;

impl RngAlgorithm for MaxRng {
    fn next_u64(&self, state: &mut u64) -> u64 {
        *state = state.wrapping_add(1);
        u64::MAX
    }
}

struct Script(VecDeque<String>);

impl LineReader for Script {
    fn read_line(&mut self) -> Option<String> {
        self.0.pop_front()
    }
}

#[test]
fn mock_clock_and_rng_are_used() {
    let mut rt = quiet_runtime();
    rt.set_clock(Box::new(MockClock));
    rt.set_rng_algorithm(Box::new(MaxRng));
    rt.set_rng_seed(0);
    assert_eq!(call(&mut rt, "datetime", "now", &[]), Value::from_f64(1234567890.0));
    assert_eq!(call(&mut rt, "datetime", "clock", &[]), Value::from_f64(0.042));
    let r = call(&mut rt, "math", "random", &[]).as_number().unwrap();
    assert!(r < 1.0 && r > 0.999, "{r}");
}

#[test]
fn seeded_default_rng_is_reproducible() {
    let mut a = quiet_runtime();
    let mut b = quiet_runtime();
    a.set_rng_seed(7);
    b.set_rng_seed(7);
    for _ in 0..4 {
        let x = call(&mut a, "math", "random", &[]);
        assert_eq!(x, call(&mut b, "math", "random", &[]));
        let x = x.as_number().unwrap();
        assert!((0.0..1.0).contains(&x));
    }
}

#[test]
fn input_reads_from_the_line_reader() {
    let mut rt = quiet_runtime();
    rt.set_line_reader(Box::new(Script(VecDeque::from(["Ada".to_string(), String::new()]))));
    let prompt = rt.new_string("name? ");
    let name = call(&mut rt, "io", "input", &[prompt]);
    assert_eq!(rt.as_str(name), Some("Ada"));
    assert_eq!(call(&mut rt, "io", "pause", &[]), Value::from_f64(10.0));
    assert_eq!(call(&mut rt, "io", "input", &[]), Value::NULL);
    assert_eq!(call(&mut rt, "io", "pause", &[]), Value::from_f64(-1.0));
    assert_eq!(rt.output(), "name? ");
}

#[test]
fn print_writes_display_forms() {
    let mut rt = quiet_runtime();
    let s = rt.new_string("x =");
    call(&mut rt, "io", "print", &[s]);
    call(&mut rt, "io", "println", &[Value::from_f64(1.5), Value::TRUE]);
    assert_eq!(rt.take_output(), "x =1.5true\n");
    assert!(rt.output().is_empty());
}
