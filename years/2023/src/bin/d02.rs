lib::entry!(y2023::d02::solve, input = "d02.txt");
