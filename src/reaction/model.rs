use crate::field::Field;

/// Local reaction term of one species.
///
/// Implement this to plug custom kinetics into the integrator. Both fields
/// are the pre-update snapshot; the returned field must have the same shape.
/// Any `Fn(&Field, &Field) -> Field` closure is a reaction as well.
pub trait Reaction {
    /// Reaction rate at every cell given the current concentrations.
    fn rate(&self, a: &Field, b: &Field) -> Field;

    /// Human-readable name for logging and error messages.
    fn name(&self) -> &str {
        "unnamed"
    }
}

impl<F> Reaction for F
where
    F: Fn(&Field, &Field) -> Field,
{
    fn rate(&self, a: &Field, b: &Field) -> Field {
        self(a, b)
    }

    fn name(&self) -> &str {
        "closure"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(a: &Field, b: &Field) -> Field {
        a.component_mul(b)
    }

    #[test]
    fn closures_and_fns_are_reactions() {
        let a = Field::from_element(2, 2, 3.0);
        let b = Field::from_element(2, 2, 0.5);

        let shift = 0.25;
        let closure = move |a: &Field, _b: &Field| a.add_scalar(shift);
        assert_eq!(closure.rate(&a, &b)[(0, 0)], 3.25);
        assert_eq!(Reaction::name(&closure), "closure");

        let boxed: Box<dyn Reaction> = Box::new(product);
        assert_eq!(boxed.rate(&a, &b)[(1, 1)], 1.5);
    }
}
