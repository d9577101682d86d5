use labelled_array::{sel, AxisIndex, AxisSlice, LabelledArray, LabelledArrayError, Selection};
use ndarray::ArrayD;

fn example() -> LabelledArray<i32> {
    let values = ArrayD::from_shape_vec(vec![2, 3], vec![1, 2, 3, 4, 5, 6]).unwrap();
    LabelledArray::new(values, vec![vec!["a", "b"], vec!["x", "y", "z"]], None).unwrap()
}

#[test]
fn test_get_single_element() {
    let arr = example();
    let view = arr.get(&[AxisIndex::at(1), AxisIndex::at(2)]).unwrap();
    assert_eq!(view.ndim(), 0);
    assert_eq!(view.iter().copied().collect::<Vec<_>>(), vec![6]);
}

#[test]
fn test_get_slices() {
    let arr = example();
    let view = arr
        .get(&[
            AxisIndex::full(),
            AxisIndex::Slice(AxisSlice::new(Some(-2), None, 1)),
        ])
        .unwrap();
    assert_eq!(view.shape(), &[2, 2]);
    assert_eq!(view.iter().copied().collect::<Vec<_>>(), vec![2, 3, 5, 6]);
}

#[test]
fn test_set_then_sel_sees_new_value() {
    let mut arr = example();
    arr.set(&[AxisIndex::at(0), AxisIndex::at(1)], 42).unwrap();
    assert_eq!(sel!(arr; "a", "y").unwrap(), Selection::Scalar(42));
    assert_eq!(arr.shape(), &[2, 3]);
}

#[test]
fn test_set_row() {
    let mut arr = example();
    arr.set(&[AxisIndex::at(-1)], 0).unwrap();
    assert_eq!(arr.values().iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 0, 0, 0]);
}

#[test]
fn test_get_mut_writes_through() {
    let mut arr = example();
    {
        let mut column = arr.get_mut(&[AxisIndex::full(), AxisIndex::at(0)]).unwrap();
        column.map_inplace(|v| *v *= 10);
    }
    assert_eq!(arr.values().iter().copied().collect::<Vec<_>>(), vec![10, 2, 3, 40, 5, 6]);
}

#[test]
fn test_out_of_range_index() {
    let mut arr = example();
    assert!(matches!(
        arr.get(&[AxisIndex::at(0), AxisIndex::at(3)]),
        Err(LabelledArrayError::IndexOutOfBounds {
            index: 3,
            axis: 1,
            size: 3
        })
    ));
    assert!(matches!(
        arr.set(&[AxisIndex::at(-3)], 0),
        Err(LabelledArrayError::IndexOutOfBounds { .. })
    ));
    assert_eq!(arr.values().iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_into_values() {
    let arr = example();
    let values = arr.clone().into_values();
    assert_eq!(&values, arr.values());
}

#[test]
fn test_into_parts_rebuilds_array() {
    let arr = example();
    let (values, axis_labels, axis_names) = arr.clone().into_parts();
    assert_eq!(&values, arr.values());
    assert_eq!(axis_names, vec!["axis_0", "axis_1"]);
    assert!(axis_labels[1].contains("z"));

    let rebuilt = LabelledArray::new(values, axis_labels, Some(axis_names)).unwrap();
    assert_eq!(rebuilt, arr);
}
