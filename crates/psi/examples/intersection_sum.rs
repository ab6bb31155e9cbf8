//! Runs the intersection-sum protocol on the demo inputs: P1 holds four
//! identifiers, P2 holds four weighted entries, two identifiers are common.

use psi::paillier::DEFAULT_KEY_BITS;
use psi::protocol;
use psi_math::group::GroupParams;
use rand::thread_rng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = thread_rng();
    let group = GroupParams::rfc3526_modp_2048_arc();

    let v: Vec<String> = ["alice", "bob", "carol", "dave"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let w: Vec<(String, u64)> = [("bob", 5u64), ("erin", 7), ("carol", 11), ("frank", 13)]
        .iter()
        .map(|(id, t)| (id.to_string(), *t))
        .collect();

    println!("P1 set V = {:?}", v);
    println!("P2 set W = {:?}", w);
    println!();

    let result = protocol::run(&group, v, w, DEFAULT_KEY_BITS, &mut rng)?;

    println!("Intersection size (P1's view) = {}", result.intersection_size);
    println!("Intersection-sum  (P2's view) = {}", result.sum);

    Ok(())
}
