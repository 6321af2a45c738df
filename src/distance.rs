use ndarray::ArrayView1;
use num_traits::Float;

pub(crate) fn euclidean_distance<T: Float>(a: ArrayView1<T>, b: ArrayView1<T>) -> T {
    squared_euclidean_distance(a, b).sqrt()
}

pub(crate) fn squared_euclidean_distance<T: Float>(a: ArrayView1<T>, b: ArrayView1<T>) -> T {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| ((*x) - (*y)) * ((*x) - (*y)))
        .fold(T::zero(), std::ops::Add::add)
}
