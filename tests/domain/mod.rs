mod bbox_test;
mod segment_test;
