//! Testimonial rotation — deterministic, session-keyed.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub quote: &'static str,
    pub author: &'static str,
    pub role: &'static str,
}

pub const TESTIMONIALS: &[Testimonial] = &[
    Testimonial {
        quote: "The AI rewrite turned my rambling bullets into something recruiters actually read.",
        author: "Priya",
        role: "Data Engineer",
    },
    Testimonial {
        quote: "Went from three callbacks a month to three a week after switching templates.",
        author: "Marcus",
        role: "Product Manager",
    },
    Testimonial {
        quote: "Worth it for the unlimited exports alone. I tailor my CV per application now.",
        author: "Elena",
        role: "UX Designer",
    },
    Testimonial {
        quote: "I stopped fighting with formatting and started landing interviews.",
        author: "Tomás",
        role: "Backend Developer",
    },
];

/// Rotates through the testimonial list by session count so returning users
/// see fresh social proof without any stored rotation state.
pub fn pick_testimonial(total_sessions: u32) -> &'static Testimonial {
    let index = (total_sessions as usize) % TESTIMONIALS.len();
    &TESTIMONIALS[index]
}
