//! Conversion of numeric collections into plot data.

/// Types that can be turned into a series of `f64` values.
pub trait IntoPlotData {
    fn into_plot_data(self) -> Vec<f64>;
}

impl IntoPlotData for Vec<f64> {
    fn into_plot_data(self) -> Vec<f64> {
        self
    }
}

macro_rules! impl_plot_data {
    ($($t:ty),*) => {
        $(
            impl IntoPlotData for &[$t] {
                fn into_plot_data(self) -> Vec<f64> {
                    self.iter().map(|v| *v as f64).collect()
                }
            }

            impl IntoPlotData for &Vec<$t> {
                fn into_plot_data(self) -> Vec<f64> {
                    self.as_slice().into_plot_data()
                }
            }

            impl<const N: usize> IntoPlotData for [$t; N] {
                fn into_plot_data(self) -> Vec<f64> {
                    self.as_slice().into_plot_data()
                }
            }
        )*
    };
}

impl_plot_data!(f64, f32, i32, i64, usize);

macro_rules! impl_owned_plot_data {
    ($($t:ty),*) => {
        $(
            impl IntoPlotData for Vec<$t> {
                fn into_plot_data(self) -> Vec<f64> {
                    self.into_iter().map(|v| v as f64).collect()
                }
            }
        )*
    };
}

impl_owned_plot_data!(f32, i32, i64, usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(vec![1_i32, 2, 3].into_plot_data(), vec![1.0, 2.0, 3.0]);
        assert_eq!([0.5_f32, 1.5].into_plot_data(), vec![0.5, 1.5]);
        let v = vec![4_usize];
        assert_eq!((&v).into_plot_data(), vec![4.0]);
    }
}
