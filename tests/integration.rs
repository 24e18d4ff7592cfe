//! Integration tests: CSV file in, clusters out.

use lloyd::{read_csv_path, CsvOptions, Error, Kmeans, Termination};
use std::io::Write;
use tempfile::NamedTempFile;

/// Two well-separated groups of three flowers each, with a class column.
fn create_test_csv() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "length,width,class").unwrap();

    // Small flowers
    writeln!(file, "1.0,1.0,small").unwrap();
    writeln!(file, "2.0,1.0,small").unwrap();
    writeln!(file, "1.5,2.5,small").unwrap();

    // Large flowers
    writeln!(file, "9.0,9.0,large").unwrap();
    writeln!(file, "10.0,9.0,large").unwrap();
    writeln!(file, "9.5,10.5,large").unwrap();

    file
}

#[test]
fn test_end_to_end_pipeline() {
    let test_file = create_test_csv();
    let data = read_csv_path(test_file.path(), &CsvOptions::default()).unwrap();

    assert_eq!(data.len(), 6);
    assert_eq!(data.dim(), 2);

    // Stride seeds are instances 0 and 3, one per group.
    let fit = Kmeans::new(2).with_max_iter(10).fit(&data).unwrap();

    assert_eq!(fit.termination(), Termination::Converged);
    assert_eq!(fit.iterations(), 2);
    assert_eq!(fit.clusters()[0].members(), &[0, 1, 2]);
    assert_eq!(fit.clusters()[1].members(), &[3, 4, 5]);

    assert_eq!(fit.clusters()[0].center(), &[1.5, 1.5]);
    assert_eq!(fit.clusters()[1].center(), &[9.5, 9.5]);

    assert_eq!(fit.predict(&[2.0, 2.0]).unwrap(), 0);
    assert_eq!(fit.predict(&[7.0, 7.5]).unwrap(), 1);
}

#[test]
fn test_more_clusters_than_instances() {
    let test_file = create_test_csv();
    let data = read_csv_path(test_file.path(), &CsvOptions::default()).unwrap();

    let fit = Kmeans::new(8).fit(&data).unwrap();
    let sizes = fit.sizes();

    assert_eq!(sizes.len(), 8);
    assert_eq!(sizes.iter().sum::<usize>(), 6);
    // Seeds 0,0,1,2,3,3,4,5: clusters 1 and 5 duplicate a lower-indexed seed.
    assert_eq!(sizes[1], 0);
    assert_eq!(sizes[5], 0);
    assert_eq!(fit.clusters()[1].center(), data.row(0));
    assert_eq!(fit.clusters()[5].center(), data.row(3));
}

#[test]
fn test_bad_input_is_reported() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "a,b,class").unwrap();
    writeln!(file, "1.0,NaNa,x").unwrap();

    let err = read_csv_path(file.path(), &CsvOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Parse { line: 2, field: 1, .. }));
}

#[test]
fn test_nan_field_is_reported() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "a,b,class").unwrap();
    writeln!(file, "1.0,2.0,x").unwrap();
    writeln!(file, "NaN,2.0,x").unwrap();

    let err = read_csv_path(file.path(), &CsvOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Parse { line: 3, field: 0, .. }));
}
