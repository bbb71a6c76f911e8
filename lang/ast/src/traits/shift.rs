use crate::ident::Idx;

/// De Bruijn shifting
///
/// When we manipulate terms in de Bruijn notation we often have to change
/// the indices of the loose variables inside a term, e.g. when moving a
/// term underneath an additional binder. This is what the "shift" and
/// "shift_above" functions from this trait are for.
///
/// Consider the lambda calculus whose syntax is "e := n | λ. e | e e".
/// The shift_above operation is defined as follows:
/// - n.shift_above(cutoff, by) = if n > cutoff { n + by } else { n }
/// - (λ. e).shift_above(cutoff, by) = λ. (e.shift_above(cutoff + 1, by))
/// - (e1 e2).shift_above(cutoff, by) = (e1.shift_above(cutoff, by)) (e2.shift_above(cutoff, by))
///
/// The cutoff is the number of binders we have traversed; since indices
/// are 1-based, an index is loose precisely when it exceeds the cutoff.
///
/// Ref: <https://www.cs.cornell.edu/courses/cs4110/2018fa/lectures/lecture15.pdf>
pub trait Shift: Sized {
    /// Shift all loose variables in `self` by the value indicated with the
    /// `by` argument.
    fn shift(&mut self, by: isize) {
        self.shift_above(0, by)
    }

    /// Shift every loose de Bruijn index contained in `self` by the value
    /// indicated with the `by` argument. Indices bound by one of the first
    /// `cutoff` enclosing binders are not affected.
    ///
    /// In order to implement `shift_above` correctly you have to increase
    /// `cutoff` by 1 whenever you go recursively under a binder.
    fn shift_above(&mut self, cutoff: usize, by: isize);
}

pub fn shift_and_clone<T: Shift + Clone>(arg: &T, by: isize) -> T {
    let mut cloned = arg.clone();
    cloned.shift(by);
    cloned
}

impl Shift for Idx {
    fn shift_above(&mut self, cutoff: usize, by: isize) {
        if self.0 > cutoff {
            self.0 = (self.0 as isize + by) as usize;
        }
    }
}

impl Shift for () {
    fn shift_above(&mut self, _cutoff: usize, _by: isize) {}
}

impl<T: Shift> Shift for Box<T> {
    fn shift_above(&mut self, cutoff: usize, by: isize) {
        (**self).shift_above(cutoff, by)
    }
}

impl<T: Shift> Shift for Option<T> {
    fn shift_above(&mut self, cutoff: usize, by: isize) {
        if let Some(inner) = self.as_mut() {
            inner.shift_above(cutoff, by)
        }
    }
}

impl<T: Shift> Shift for Vec<T> {
    fn shift_above(&mut self, cutoff: usize, by: isize) {
        self.iter_mut().for_each(|x| x.shift_above(cutoff, by))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_loose() {
        let mut idx = Idx(1);
        idx.shift(1);
        assert_eq!(idx, Idx(2));
    }

    #[test]
    fn shift_below_cutoff() {
        let mut idx = Idx(1);
        idx.shift_above(1, 1);
        assert_eq!(idx, Idx(1));
    }

    #[test]
    fn shift_down() {
        let mut idx = Idx(3);
        idx.shift_above(1, -1);
        assert_eq!(idx, Idx(2));
    }
}
