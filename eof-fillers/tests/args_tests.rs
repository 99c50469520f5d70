use clap::Parser;
use eof_bytecode::Eips;
use eof_fillers::Args;

#[test]
fn test_args_parse_no_flags() {
    let args = Args::parse_from(["eof-fill"]);
    assert!(args.eips.is_empty());
    assert!(!args.valid_only && !args.invalid_only);
    assert_eq!(args.eip_set().unwrap(), Eips::V1);
}

#[test]
fn test_args_parse_repeated_eips() {
    let args = Args::parse_from(["eof-fill", "--eip", "3540", "-e", "3670"]);
    assert_eq!(args.eips, vec![3540, 3670]);
    assert_eq!(args.eip_set().unwrap(), Eips::EOF | Eips::CODE_VALIDATION);
}

#[test]
fn test_args_unknown_eip_fails() {
    let args = Args::parse_from(["eof-fill", "--eip", "1559"]);
    assert!(args.eip_set().is_err());
}

#[test]
fn test_args_valid_and_invalid_only_conflict() {
    let result = Args::try_parse_from(["eof-fill", "--valid-only", "--invalid-only"]);
    assert!(result.is_err());
}

#[test]
fn test_args_verbosity_counts() {
    let args = Args::parse_from(["eof-fill", "-vv"]);
    assert_eq!(args.verbose, 2);
}
